use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Which source set an icon was discovered in. Determines the sprite
/// reference prefix used by the generated wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconOrigin {
    Plain,
    Optimized,
}

impl IconOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconOrigin::Plain => "plain",
            IconOrigin::Optimized => "optimized",
        }
    }

    fn sprite_prefix(&self) -> &'static str {
        match self {
            IconOrigin::Plain => "",
            IconOrigin::Optimized => "optimized/",
        }
    }
}

/// One discovered SVG source file
#[derive(Debug, Clone)]
pub struct SourceIcon {
    /// Absolute path to the file
    pub path: PathBuf,

    /// Base name including the `.svg` extension
    pub filename: String,

    /// Which source set the file came from
    pub origin: IconOrigin,
}

impl SourceIcon {
    pub fn new(path: PathBuf, filename: String, origin: IconOrigin) -> Self {
        Self {
            path,
            filename,
            origin,
        }
    }

    /// Icon name: the filename without its `.svg` extension
    pub fn name(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.filename)
    }

    /// Sprite id the wrapper will reference: `name` for plain icons,
    /// `optimized/name` for optimized ones
    pub fn sprite_ref(&self) -> String {
        format!("{}{}", self.origin.sprite_prefix(), self.name())
    }

    /// Load the file's current contents
    pub fn read_contents(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// True when `name` carries a real `.svg` extension, case-insensitive and
/// anchored at the end of the name. `foo.svgx` and `readme.svg.bak` do
/// not match; `ICON.SVG` does.
pub fn is_svg_filename(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// List the SVG files directly inside `dir`, sorted by filename.
///
/// The scan is flat: subdirectories are not descended into, so a nested
/// optimized directory never leaks into its parent's listing. A missing
/// directory yields an empty list; callers that require the directory to
/// exist check before scanning.
pub fn scan_svg_dir(dir: &Path, origin: IconOrigin) -> Vec<SourceIcon> {
    if !dir.exists() {
        trace!("Directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let icons: Vec<SourceIcon> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let filename = entry.file_name().to_str()?.to_string();
            if !is_svg_filename(&filename) {
                trace!("Skipping non-svg entry: {}", filename);
                return None;
            }
            Some(SourceIcon::new(entry.into_path(), filename, origin))
        })
        .collect();

    debug!(
        "Found {} {} icons in {}",
        icons.len(),
        origin.as_str(),
        dir.display()
    );
    icons
}
