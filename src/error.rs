//! Error types for library scanning.
//!
//! Only [`ScanError`] ever reaches a caller of a scan. Per-file problems are
//! [`TagError`]s, which the scanner absorbs into a degraded `Track`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `ScanError`.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that abort a whole scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The root does not exist, cannot be resolved or is not a directory.
    #[error("invalid library path {}: {reason}", path.display())]
    PathInvalid { path: PathBuf, reason: String },

    /// Cancellation was requested and the caller asked for a hard stop.
    #[error("scan cancelled after {processed} files")]
    Cancelled { processed: usize },

    /// The extraction worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

impl ScanError {
    pub(crate) fn path_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::PathInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            ScanError::PathInvalid { path, .. } => {
                format!("Folder not found or not accessible: {}", path.display())
            }
            ScanError::Cancelled { .. } => "Scan cancelled".to_string(),
            ScanError::WorkerPool(_) => "Could not start the library scan".to_string(),
        }
    }
}

/// Per-file tag extraction failures.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] lofty::error::LoftyError),

    #[error("tag reading timed out after {0} ms")]
    Timeout(u64),

    #[error("tag parser panicked")]
    Panicked,
}
