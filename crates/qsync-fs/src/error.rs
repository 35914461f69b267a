//! Error types for qsync-fs

use std::path::PathBuf;

/// Result type for qsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in qsync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Expected an absolute path, got {path}")]
    NotAbsolute { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
