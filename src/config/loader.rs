use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with a source file whose content does not parse as an SVG
/// document (unparseable XML or no root `svg` element).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Log a warning, leave the file alone, continue with the batch
    #[default]
    Skip,

    /// Fail the whole run on the first malformed file
    Abort,
}

/// Configuration for a generation run.
///
/// All three directories may be given relative to the project root passed
/// on the command line; call [`Config::resolved`] to anchor them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of plain icon sources (read-only)
    pub svg_dir: PathBuf,

    /// Directory of optimized icon sources, rewritten in place during
    /// normalization
    pub optimized_dir: PathBuf,

    /// Directory the wrapper templates are (re)written into
    pub components_dir: PathBuf,

    /// Attribute names removed from optimized icons (root element and its
    /// direct children)
    pub strip_attributes: Vec<String>,

    /// Extension of generated wrapper files, replacing `.svg`
    pub template_extension: String,

    /// Literal placeholder spliced into each wrapper; the host template
    /// engine expands it to the caller-supplied attributes at render time
    pub attributes_placeholder: String,

    /// Policy for files that fail to parse as SVG
    pub on_malformed: MalformedPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            svg_dir: PathBuf::from("assets/svg"),
            optimized_dir: PathBuf::from("assets/svg/optimized"),
            components_dir: PathBuf::from("templates/components/svg"),
            strip_attributes: vec![
                "width".to_string(),
                "height".to_string(),
                "fill".to_string(),
            ],
            template_extension: ".html.tera".to_string(),
            attributes_placeholder: "{{ attributes | safe }}".to_string(),
            on_malformed: MalformedPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".spritegen.yml",
            ".spritegen.yaml",
            ".spritegen.toml",
            "spritegen.yml",
            "spritegen.yaml",
            "spritegen.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Anchor the configured directories against the project root
    pub fn resolved(mut self, project_root: &Path) -> Self {
        for dir in [
            &mut self.svg_dir,
            &mut self.optimized_dir,
            &mut self.components_dir,
        ] {
            if dir.is_relative() {
                *dir = project_root.join(&*dir);
            }
        }
        self
    }
}
