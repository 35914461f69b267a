//! The build workspace root

use crate::error::{Error, Result};
use crate::path::NormalizedPath;
use std::path::Path;

/// Absolute root of the build workspace.
///
/// Workspace-relative strings from the build graph (content roots with the
/// workspace anchor, exclude folders) are resolved through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceRoot {
    path: NormalizedPath,
}

impl WorkspaceRoot {
    /// Wrap an already absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAbsolute`] for a relative path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = NormalizedPath::new(path);
        if !path.is_absolute() {
            return Err(Error::NotAbsolute {
                path: path.to_native(),
            });
        }
        Ok(Self { path })
    }

    /// Canonicalize an existing directory and use it as the workspace root.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let canonical = dunce::canonicalize(dir).map_err(|e| Error::io(dir, e))?;
        tracing::debug!(root = %canonical.display(), "Resolved workspace root");
        Self::new(canonical)
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Absolute path of a workspace-relative path.
    pub fn absolute_path_for(&self, relative: impl AsRef<Path>) -> NormalizedPath {
        self.path.resolve(relative)
    }
}

impl std::fmt::Display for WorkspaceRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}
