use crate::svg::SvgError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions a generation run can hit, each carrying the file path
/// and stage needed to fix the asset and re-run.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    /// A configured source directory does not exist at scan time
    #[error("source directory not found: {}", path.display())]
    #[diagnostic(
        code(spritegen::missing_source_dir),
        help("check the configured icon directories or pass --svg-dir / --optimized-dir")
    )]
    MissingSourceDir { path: PathBuf },

    /// A source file could not be parsed as an SVG document
    #[error("{}: {source}", path.display())]
    #[diagnostic(
        code(spritegen::malformed_svg),
        help("fix the SVG source, or drop --strict to skip malformed files")
    )]
    MalformedSvg {
        path: PathBuf,
        #[source]
        source: SvgError,
    },

    /// A filesystem operation failed; the run stops immediately and can
    /// safely be retried after the underlying problem is fixed
    #[error("{stage}: {}: {source}", path.display())]
    #[diagnostic(code(spritegen::io))]
    Io {
        stage: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(stage: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            stage,
            path: path.to_path_buf(),
            source,
        }
    }
}
