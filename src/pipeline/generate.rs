use super::{PipelineError, SkippedFile};
use crate::config::{Config, MalformedPolicy};
use crate::discovery::{scan_svg_dir, IconOrigin, SourceIcon};
use crate::svg;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// One generated wrapper template
#[derive(Debug, Clone)]
pub struct WrapperRecord {
    /// Icon name (filename without the `.svg` extension)
    pub name: String,

    /// Source set the winning variant came from
    pub origin: IconOrigin,

    /// Sprite id referenced by the wrapper's `<use>`
    pub sprite_ref: String,

    /// The source's `viewBox`, forwarded verbatim (possibly empty)
    pub view_box: String,

    /// Path of the SVG source the wrapper was generated from
    pub source_path: PathBuf,

    /// Path of the written wrapper file
    pub output_path: PathBuf,

    /// Source path of a same-named icon this wrapper displaced
    pub replaced: Option<PathBuf>,
}

/// Outcome of a generation pass
#[derive(Debug, Default)]
pub struct GenerateOutcome {
    pub wrappers: Vec<WrapperRecord>,
    pub skipped: Vec<SkippedFile>,
}

/// Writes one wrapper template per discovered icon.
///
/// Each wrapper is an `<svg>` shell that forwards caller-supplied
/// attributes through the host engine's placeholder, carries the source's
/// `viewBox`, and pulls the artwork in with a sprite `<use>` reference.
pub struct Generator<'a> {
    config: &'a Config,
    dry_run: bool,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self) -> Result<GenerateOutcome, PipelineError> {
        for dir in [&self.config.svg_dir, &self.config.optimized_dir] {
            if !dir.is_dir() {
                return Err(PipelineError::MissingSourceDir { path: dir.clone() });
            }
        }

        // Plain icons first, then optimized, each listing sorted. A base
        // name present in both sets resolves to the optimized variant.
        let mut icons = scan_svg_dir(&self.config.svg_dir, IconOrigin::Plain);
        icons.extend(scan_svg_dir(&self.config.optimized_dir, IconOrigin::Optimized));

        let pb = ProgressBar::new(icons.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut outcome = GenerateOutcome::default();
        let mut by_output: HashMap<PathBuf, usize> = HashMap::new();

        for icon in &icons {
            pb.set_message(icon.filename.clone());
            match self.build_record(icon) {
                Ok(record) => match by_output.entry(record.output_path.clone()) {
                    std::collections::hash_map::Entry::Occupied(slot) => {
                        let index = *slot.get();
                        let displaced = outcome.wrappers[index].source_path.clone();
                        warn!(
                            "{} replaces {} for wrapper {}",
                            record.source_path.display(),
                            displaced.display(),
                            record.output_path.display()
                        );
                        outcome.wrappers[index] = WrapperRecord {
                            replaced: Some(displaced),
                            ..record
                        };
                    }
                    std::collections::hash_map::Entry::Vacant(slot) => {
                        slot.insert(outcome.wrappers.len());
                        outcome.wrappers.push(record);
                    }
                },
                Err(err @ PipelineError::MalformedSvg { .. })
                    if self.config.on_malformed == MalformedPolicy::Skip =>
                {
                    warn!("Skipping {}: {}", icon.path.display(), err);
                    outcome.skipped.push(SkippedFile {
                        path: icon.path.clone(),
                        stage: "generate",
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    pb.finish_and_clear();
                    return Err(err);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        if !self.dry_run {
            self.write_wrappers(&outcome.wrappers)?;
        }

        Ok(outcome)
    }

    fn build_record(&self, icon: &SourceIcon) -> Result<WrapperRecord, PipelineError> {
        let markup = icon
            .read_contents()
            .map_err(|e| PipelineError::io("generate", &icon.path, e))?;

        let info = svg::inspect(&markup).map_err(|source| PipelineError::MalformedSvg {
            path: icon.path.clone(),
            source,
        })?;

        let name = icon.name().to_string();
        let output_path = self
            .config
            .components_dir
            .join(format!("{}{}", name, self.config.template_extension));

        Ok(WrapperRecord {
            sprite_ref: icon.sprite_ref(),
            name,
            origin: icon.origin,
            view_box: info.view_box,
            source_path: icon.path.clone(),
            output_path,
            replaced: None,
        })
    }

    fn write_wrappers(&self, wrappers: &[WrapperRecord]) -> Result<(), PipelineError> {
        if wrappers.is_empty() {
            return Ok(());
        }

        // Idempotent: succeeds when the directory already exists
        std::fs::create_dir_all(&self.config.components_dir)
            .map_err(|e| PipelineError::io("generate", &self.config.components_dir, e))?;

        for record in wrappers {
            let markup = self.render_wrapper(record);
            std::fs::write(&record.output_path, markup)
                .map_err(|e| PipelineError::io("generate", &record.output_path, e))?;
            debug!("Wrote {}", record.output_path.display());
        }

        Ok(())
    }

    fn render_wrapper(&self, record: &WrapperRecord) -> String {
        format!(
            "<svg {} viewbox='{}'>\n<use href='#{}'></use>\n</svg>",
            self.config.attributes_placeholder, record.view_box, record.sprite_ref
        )
    }
}
