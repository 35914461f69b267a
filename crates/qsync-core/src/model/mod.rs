//! The live IDE project model, as seen from the reconciler
//!
//! The host owns the real project model. The reconciler reaches it only
//! through [`ModifiableModels`], which a [`SyncTransaction`] hands out for the
//! duration of one sync. Per-library and per-module state is exchanged as
//! staged value copies ([`LibraryModel`], [`ModuleRoots`]): taking one copies
//! the current state, and nothing changes until the copy is committed back.
//!
//! [`SyncTransaction`]: crate::SyncTransaction

mod library;
mod memory;
mod module;

pub use library::{ClassesRoot, LibraryModel, RootKind};
pub use memory::{DEFAULT_MODULE_TYPE, InMemoryProject, LibraryRecord, ModuleRecord, ProjectState};
pub use module::{
    ContentEntry, DependencyScope, LibraryOrderEntry, ModuleRoots, SourceFolder,
    SourceRootProperties, SourceRootType,
};

use crate::Result;
use qsync_fs::NormalizedPath;
use std::fmt;
use uuid::Uuid;

/// Opaque host handle for a library.
///
/// Only meaningful inside the transaction that produced it; identity across
/// syncs is established by name lookup, never by holding on to a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LibraryHandle(Uuid);

/// Opaque host handle for a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleHandle(Uuid);

impl LibraryHandle {
    /// Mint a fresh handle. Hosts call this when creating a library.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl ModuleHandle {
    /// Mint a fresh handle. Hosts call this when creating a module.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LibraryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "library:{}", self.0)
    }
}

impl fmt::Display for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module:{}", self.0)
    }
}

/// A library as listed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryInfo {
    pub handle: LibraryHandle,
    pub name: String,
}

/// A module as listed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub handle: ModuleHandle,
    pub name: String,
    pub file_path: NormalizedPath,
}

/// Mutable access to the host project model.
///
/// Implementations are only reachable inside a sync transaction; every
/// mutation made through them becomes visible when the transaction commits
/// and is discarded when it fails.
pub trait ModifiableModels {
    /// Id of the host's default module type.
    fn default_module_type(&self) -> &str;

    /// Every library currently in the project library table.
    fn all_libraries(&self) -> Vec<LibraryInfo>;

    fn library_by_name(&self, name: &str) -> Option<LibraryHandle>;

    /// Create an empty library.
    fn create_library(&mut self, name: &str) -> Result<LibraryHandle>;

    fn remove_library(&mut self, library: LibraryHandle) -> Result<()>;

    /// Staged copy of a library's classes roots.
    fn library_model(&self, library: LibraryHandle) -> Result<LibraryModel>;

    /// Replace a library's classes roots with a staged copy.
    fn commit_library(&mut self, library: LibraryHandle, model: LibraryModel) -> Result<()>;

    /// Every module currently in the project.
    fn all_modules(&self) -> Vec<ModuleInfo>;

    /// Create a module stored at `file_path`.
    ///
    /// The module name is the file stem. If a module with that name already
    /// exists it gets a fresh handle; its previous roots are carried over
    /// for the caller to clear.
    fn new_module(&mut self, file_path: &NormalizedPath, module_type: &str)
    -> Result<ModuleHandle>;

    fn dispose_module(&mut self, module: ModuleHandle) -> Result<()>;

    /// Staged copy of a module's roots.
    fn module_roots(&self, module: ModuleHandle) -> Result<ModuleRoots>;

    /// Replace a module's roots with a staged copy.
    fn commit_module(&mut self, module: ModuleHandle, roots: ModuleRoots) -> Result<()>;
}

/// Module name for a module file path: the file name without its extension.
pub fn module_name_for(file_path: &NormalizedPath) -> Option<&str> {
    let file_name = file_path.file_name()?;
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => Some(stem),
        _ => Some(file_name),
    }
}
