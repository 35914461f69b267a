//! Error types for qsync-project

use std::path::PathBuf;

/// Result type for qsync-project operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a snapshot
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read snapshot at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
