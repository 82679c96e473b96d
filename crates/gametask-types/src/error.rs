use std::path::PathBuf;
use thiserror::Error;

/// Errors a caller may need to tell apart when building or preparing a task.
///
/// Emulator failures are not listed here: they propagate as `anyhow::Error`
/// and end the current run.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("movie file {} does not exist", .0.display())]
    MovieNotFound(PathBuf),

    #[error("failed to check output path {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("button map must have {expected} entries, got {actual}")]
    InvalidButtonMap { expected: usize, actual: usize },

    #[error("invalid task config: {0}")]
    InvalidConfig(String),
}
