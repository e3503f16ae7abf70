use super::PipelineError;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Removes previously generated wrapper files so the output directory only
/// ever reflects the current run.
///
/// Only regular files directly inside the directory are deleted;
/// subdirectories and other entries are left untouched. A missing
/// directory counts as already clean.
pub struct Cleaner<'a> {
    components_dir: &'a Path,
    dry_run: bool,
}

impl<'a> Cleaner<'a> {
    pub fn new(components_dir: &'a Path) -> Self {
        Self {
            components_dir,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Delete the generated files, returning how many were removed (or
    /// would be removed on a dry run).
    pub fn run(&self) -> Result<usize, PipelineError> {
        if !self.components_dir.exists() {
            trace!(
                "Output directory does not exist, nothing to clean: {}",
                self.components_dir.display()
            );
            return Ok(0);
        }

        let entries = std::fs::read_dir(self.components_dir)
            .map_err(|e| PipelineError::io("clean", self.components_dir, e))?;

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| PipelineError::io("clean", self.components_dir, e))?;
            let path: PathBuf = entry.path();

            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                trace!("Leaving non-file entry: {}", path.display());
                continue;
            }

            if self.dry_run {
                debug!("Would remove {}", path.display());
            } else {
                std::fs::remove_file(&path).map_err(|e| PipelineError::io("clean", &path, e))?;
                debug!("Removed {}", path.display());
            }
            removed += 1;
        }

        Ok(removed)
    }
}
