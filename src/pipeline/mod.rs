mod clean;
mod error;
mod generate;
mod normalize;

pub use clean::Cleaner;
pub use error::PipelineError;
pub use generate::{GenerateOutcome, Generator, WrapperRecord};
pub use normalize::{NormalizeOutcome, Normalizer};

use crate::config::Config;
use std::path::PathBuf;

/// A source file that was left out of a stage under the skip policy
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub stage: &'static str,
    pub reason: String,
}

/// Everything a finished run produced, for reporting
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Stale wrapper files removed before generation
    pub cleaned: usize,

    /// Optimized icons inspected during normalization
    pub normalized: usize,

    /// Optimized icons whose bytes changed on disk
    pub rewritten: usize,

    /// Wrapper templates written, one per icon
    pub wrappers: Vec<WrapperRecord>,

    /// Files skipped across both stages, with reasons
    pub skipped: Vec<SkippedFile>,

    /// Whether this was a dry run (nothing touched the filesystem)
    pub dry_run: bool,
}

/// The full clean, normalize, generate sequence as one call.
///
/// The cleaner always finishes before the generator starts writing, so the
/// output directory holds only the current run's files. Re-running is
/// always safe; every run regenerates everything.
pub struct Pipeline<'a> {
    config: &'a Config,
    dry_run: bool,
}

impl<'a> Pipeline<'a> {
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

    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let cleaned = Cleaner::new(&self.config.components_dir)
            .with_dry_run(self.dry_run)
            .run()?;

        let normalize = Normalizer::new(self.config)
            .with_dry_run(self.dry_run)
            .run()?;

        let generate = Generator::new(self.config)
            .with_dry_run(self.dry_run)
            .run()?;

        let mut skipped = normalize.skipped;
        skipped.extend(generate.skipped);

        Ok(RunSummary {
            cleaned,
            normalized: normalize.processed,
            rewritten: normalize.rewritten,
            wrappers: generate.wrappers,
            skipped,
            dry_run: self.dry_run,
        })
    }
}
