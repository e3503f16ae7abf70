use super::{PipelineError, SkippedFile};
use crate::config::{Config, MalformedPolicy};
use crate::discovery::{scan_svg_dir, IconOrigin, SourceIcon};
use crate::svg;
use tracing::{debug, warn};

/// Outcome of a normalization pass
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    /// Files inspected in the optimized directory
    pub processed: usize,

    /// Files whose content actually changed on disk
    pub rewritten: usize,

    /// Files left alone under the skip policy
    pub skipped: Vec<SkippedFile>,
}

/// Strips the configured presentation attributes from every optimized
/// icon, rewriting each file in place.
///
/// Optimized sprite icons are sized and colored at the use site, so baked
/// in `width`/`height`/`fill` on the source would override the consumer.
/// Stripping covers the root element and its direct children only.
pub struct Normalizer<'a> {
    config: &'a Config,
    dry_run: bool,
}

impl<'a> Normalizer<'a> {
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

    pub fn run(&self) -> Result<NormalizeOutcome, PipelineError> {
        let dir = &self.config.optimized_dir;
        if !dir.is_dir() {
            return Err(PipelineError::MissingSourceDir { path: dir.clone() });
        }

        let icons = scan_svg_dir(dir, IconOrigin::Optimized);
        let mut outcome = NormalizeOutcome::default();

        for icon in &icons {
            outcome.processed += 1;
            match self.normalize_file(icon) {
                Ok(true) => {
                    outcome.rewritten += 1;
                    debug!("Normalized {}", icon.path.display());
                }
                Ok(false) => {
                    debug!("Already normalized: {}", icon.path.display());
                }
                Err(err @ PipelineError::MalformedSvg { .. })
                    if self.config.on_malformed == MalformedPolicy::Skip =>
                {
                    warn!("Skipping {}: {}", icon.path.display(), err);
                    outcome.skipped.push(SkippedFile {
                        path: icon.path.clone(),
                        stage: "normalize",
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(outcome)
    }

    /// Returns whether the file's bytes changed. Leaving already-clean
    /// files untouched keeps mtimes stable and lets watch mode settle.
    fn normalize_file(&self, icon: &SourceIcon) -> Result<bool, PipelineError> {
        let markup = icon
            .read_contents()
            .map_err(|e| PipelineError::io("normalize", &icon.path, e))?;

        let stripped = svg::strip_attributes(&markup, &self.config.strip_attributes).map_err(
            |source| PipelineError::MalformedSvg {
                path: icon.path.clone(),
                source,
            },
        )?;

        if stripped == markup {
            return Ok(false);
        }

        if !self.dry_run {
            std::fs::write(&icon.path, &stripped)
                .map_err(|e| PipelineError::io("normalize", &icon.path, e))?;
        }
        Ok(true)
    }
}
