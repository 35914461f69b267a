//! In-memory project host
//!
//! A complete [`ModifiableModels`] host that keeps the project model in
//! memory. Each transaction works on a staged clone of the whole state and
//! swaps it in only when the transaction body succeeds.

use super::{
    LibraryHandle, LibraryInfo, LibraryModel, ModifiableModels, ModuleHandle, ModuleInfo,
    ModuleRoots, module_name_for,
};
use crate::transaction::SyncTransaction;
use crate::{Error, Result};
use parking_lot::Mutex;
use qsync_fs::NormalizedPath;
use std::collections::BTreeMap;

/// Module type id used when none is configured.
pub const DEFAULT_MODULE_TYPE: &str = "JAVA_MODULE";

/// A library in the project library table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRecord {
    pub handle: LibraryHandle,
    pub model: LibraryModel,
}

/// A module in the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    pub handle: ModuleHandle,
    pub file_path: NormalizedPath,
    pub module_type: String,
    pub roots: ModuleRoots,
}

/// The whole project model, keyed by library and module name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectState {
    libraries: BTreeMap<String, LibraryRecord>,
    modules: BTreeMap<String, ModuleRecord>,
}

impl ProjectState {
    pub fn libraries(&self) -> &BTreeMap<String, LibraryRecord> {
        &self.libraries
    }

    pub fn modules(&self) -> &BTreeMap<String, ModuleRecord> {
        &self.modules
    }

    pub fn library(&self, name: &str) -> Option<&LibraryRecord> {
        self.libraries.get(name)
    }

    pub fn module(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.get(name)
    }

    fn library_name(&self, handle: LibraryHandle) -> Result<&str> {
        self.libraries
            .iter()
            .find(|(_, record)| record.handle == handle)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| Error::UnknownLibraryHandle {
                handle: handle.to_string(),
            })
    }

    fn module_name(&self, handle: ModuleHandle) -> Result<&str> {
        self.modules
            .iter()
            .find(|(_, record)| record.handle == handle)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| Error::UnknownModuleHandle {
                handle: handle.to_string(),
            })
    }
}

/// Project host holding its model in memory.
///
/// Transactions are serialized by a mutex; a transaction that fails (or
/// panics) leaves the committed state untouched.
#[derive(Debug)]
pub struct InMemoryProject {
    default_module_type: String,
    state: Mutex<ProjectState>,
}

impl Default for InMemoryProject {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProject {
    pub fn new() -> Self {
        Self::with_state(ProjectState::default())
    }

    /// Start from an existing state, e.g. one left behind by an earlier sync.
    pub fn with_state(state: ProjectState) -> Self {
        Self {
            default_module_type: DEFAULT_MODULE_TYPE.to_string(),
            state: Mutex::new(state),
        }
    }

    pub fn with_default_module_type(mut self, module_type: impl Into<String>) -> Self {
        self.default_module_type = module_type.into();
        self
    }

    /// Copy of the committed state.
    pub fn snapshot(&self) -> ProjectState {
        self.state.lock().clone()
    }
}

impl SyncTransaction for InMemoryProject {
    fn run<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce(&mut dyn ModifiableModels) -> Result<T>,
    {
        let mut live = self.state.lock();
        let mut staged = StagedModels {
            default_module_type: &self.default_module_type,
            state: live.clone(),
        };

        match body(&mut staged) {
            Ok(value) => {
                *live = staged.state;
                tracing::debug!("Committed project model transaction");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Project model transaction rolled back");
                Err(e)
            }
        }
    }
}

/// Mutations staged against a private copy of the project state.
struct StagedModels<'a> {
    default_module_type: &'a str,
    state: ProjectState,
}

impl StagedModels<'_> {
    fn library_mut(&mut self, handle: LibraryHandle) -> Result<&mut LibraryRecord> {
        let name = self.state.library_name(handle)?.to_string();
        self.state
            .libraries
            .get_mut(&name)
            .ok_or_else(|| Error::host(format!("library {name} vanished")))
    }

    fn module_mut(&mut self, handle: ModuleHandle) -> Result<&mut ModuleRecord> {
        let name = self.state.module_name(handle)?.to_string();
        self.state
            .modules
            .get_mut(&name)
            .ok_or_else(|| Error::host(format!("module {name} vanished")))
    }
}

impl ModifiableModels for StagedModels<'_> {
    fn default_module_type(&self) -> &str {
        self.default_module_type
    }

    fn all_libraries(&self) -> Vec<LibraryInfo> {
        self.state
            .libraries
            .iter()
            .map(|(name, record)| LibraryInfo {
                handle: record.handle,
                name: name.clone(),
            })
            .collect()
    }

    fn library_by_name(&self, name: &str) -> Option<LibraryHandle> {
        self.state.libraries.get(name).map(|record| record.handle)
    }

    fn create_library(&mut self, name: &str) -> Result<LibraryHandle> {
        if self.state.libraries.contains_key(name) {
            return Err(Error::host(format!("library {name} already exists")));
        }
        let handle = LibraryHandle::mint();
        self.state.libraries.insert(
            name.to_string(),
            LibraryRecord {
                handle,
                model: LibraryModel::new(),
            },
        );
        Ok(handle)
    }

    fn remove_library(&mut self, library: LibraryHandle) -> Result<()> {
        let name = self.state.library_name(library)?.to_string();
        self.state.libraries.remove(&name);
        Ok(())
    }

    fn library_model(&self, library: LibraryHandle) -> Result<LibraryModel> {
        let name = self.state.library_name(library)?;
        Ok(self.state.libraries[name].model.clone())
    }

    fn commit_library(&mut self, library: LibraryHandle, model: LibraryModel) -> Result<()> {
        self.library_mut(library)?.model = model;
        Ok(())
    }

    fn all_modules(&self) -> Vec<ModuleInfo> {
        self.state
            .modules
            .iter()
            .map(|(name, record)| ModuleInfo {
                handle: record.handle,
                name: name.clone(),
                file_path: record.file_path.clone(),
            })
            .collect()
    }

    fn new_module(
        &mut self,
        file_path: &NormalizedPath,
        module_type: &str,
    ) -> Result<ModuleHandle> {
        let name = module_name_for(file_path)
            .ok_or_else(|| Error::host(format!("no module name in path {file_path}")))?
            .to_string();
        let roots = self
            .state
            .modules
            .remove(&name)
            .map(|previous| previous.roots)
            .unwrap_or_default();

        let handle = ModuleHandle::mint();
        self.state.modules.insert(
            name,
            ModuleRecord {
                handle,
                file_path: file_path.clone(),
                module_type: module_type.to_string(),
                roots,
            },
        );
        Ok(handle)
    }

    fn dispose_module(&mut self, module: ModuleHandle) -> Result<()> {
        let name = self.state.module_name(module)?.to_string();
        self.state.modules.remove(&name);
        Ok(())
    }

    fn module_roots(&self, module: ModuleHandle) -> Result<ModuleRoots> {
        let name = self.state.module_name(module)?;
        Ok(self.state.modules[name].roots.clone())
    }

    fn commit_module(&mut self, module: ModuleHandle, roots: ModuleRoots) -> Result<()> {
        for entry in roots.library_entries() {
            self.state.library_name(entry.library)?;
        }
        self.module_mut(module)?.roots = roots;
        Ok(())
    }
}
