//! Error types for qsync-core

use std::path::PathBuf;

/// Result type for qsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling the project model
///
/// Every variant aborts the enclosing sync transaction. The snapshot
/// variants mean the snapshot producer is broken; nothing is skipped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Snapshot asks for a module type this host does not know
    #[error("Unrecognised module type {module_type} for module {module}")]
    UnknownModuleType { module: String, module_type: String },

    /// Snapshot anchors a content root to something other than project or workspace
    #[error("Unrecognized content root base type {base} in module {module}")]
    UnknownContentRootBase { module: String, base: String },

    /// Module depends on a library the snapshot does not define
    #[error("Module {module} refers to library {library} not present in the snapshot")]
    MissingLibrary { module: String, library: String },

    /// Two snapshot libraries share a name
    #[error("Duplicate library in snapshot: {name}")]
    DuplicateLibrary { name: String },

    /// Two jar directories of one library resolve to the same url
    #[error("Duplicate jar directory {url} in library {library}")]
    DuplicateJarDirectory { library: String, url: String },

    /// Module name cannot be stored as a single module file
    #[error("Invalid module name {name:?}: must be non-empty and contain no path separator")]
    InvalidModuleName { name: String },

    /// Two snapshot modules share a name
    #[error("Duplicate module in snapshot: {name}")]
    DuplicateModule { name: String },

    /// Failure reported by the live project model
    #[error("Project model error: {message}")]
    Host { message: String },

    /// Library handle not known to the live model
    #[error("Unknown library handle {handle}")]
    UnknownLibraryHandle { handle: String },

    /// Module handle not known to the live model
    #[error("Unknown module handle {handle}")]
    UnknownModuleHandle { handle: String },

    /// A sync plugin failed
    #[error("Sync plugin {plugin} failed: {message}")]
    Plugin { plugin: String, message: String },

    /// The sync was cancelled before commit
    #[error("Sync cancelled")]
    Cancelled,

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration is present but unusable
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    // Transparent wrappers for underlying crate errors
    /// Path error from qsync-fs
    #[error(transparent)]
    Fs(#[from] qsync_fs::Error),

    /// Snapshot error from qsync-project
    #[error(transparent)]
    Project(#[from] qsync_project::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// True for errors caused by an internally inconsistent snapshot.
    pub fn is_configuration_inconsistency(&self) -> bool {
        matches!(
            self,
            Self::UnknownModuleType { .. }
                | Self::UnknownContentRootBase { .. }
                | Self::MissingLibrary { .. }
                | Self::DuplicateLibrary { .. }
                | Self::DuplicateJarDirectory { .. }
                | Self::InvalidModuleName { .. }
                | Self::DuplicateModule { .. }
        )
    }
}
