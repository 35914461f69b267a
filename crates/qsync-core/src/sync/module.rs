//! Module reconciliation
//!
//! Modules are not diffed. Each snapshot module is recreated from scratch on
//! every sync: a fresh module identity at a path derived from its name, all
//! previous content entries and library entries dropped, then content,
//! libraries and plugin additions re-derived from the snapshot. Modules the
//! snapshot no longer names are disposed.

use super::SyncContext;
use super::library::LibraryIndex;
use crate::config::WorkspaceLanguageSettings;
use crate::model::{
    DependencyScope, ModifiableModels, ModuleHandle, ModuleRoots, SourceRootProperties,
    SourceRootType,
};
use crate::plugin::{ModuleUpdate, PluginRegistry};
use crate::{Error, Result};
use qsync_fs::{NormalizedPath, WorkspaceRoot};
use qsync_project as desired;
use std::collections::HashSet;

/// Extension of generated module files.
pub const MODULE_FILE_EXTENSION: &str = "iml";

/// Result of reconciling modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOutcome {
    /// Modules recreated, in snapshot order
    pub modules: Vec<String>,
    /// Modules disposed because the snapshot no longer names them
    pub removed: usize,
}

/// Reconciles project modules against the snapshot.
pub struct ModuleReconciler<'a> {
    project_base: &'a NormalizedPath,
    workspace_root: &'a WorkspaceRoot,
    modules_dir: &'a NormalizedPath,
    plugins: &'a PluginRegistry,
    language_settings: &'a WorkspaceLanguageSettings,
}

impl<'a> ModuleReconciler<'a> {
    pub fn new(
        project_base: &'a NormalizedPath,
        workspace_root: &'a WorkspaceRoot,
        modules_dir: &'a NormalizedPath,
        plugins: &'a PluginRegistry,
        language_settings: &'a WorkspaceLanguageSettings,
    ) -> Self {
        Self {
            project_base,
            workspace_root,
            modules_dir,
            plugins,
            language_settings,
        }
    }

    /// Reconcile all modules, in snapshot order.
    ///
    /// `libraries` must hold every library of the snapshot, already
    /// committed.
    pub fn reconcile(
        &self,
        models: &mut dyn ModifiableModels,
        modules: &[desired::Module],
        libraries: &LibraryIndex,
        context: &mut SyncContext,
    ) -> Result<ModuleOutcome> {
        let wanted = unique_module_names(modules)?;
        let removed = self.remove_stale(models, &wanted)?;

        let mut outcome = ModuleOutcome {
            modules: Vec::with_capacity(modules.len()),
            removed,
        };
        for module in modules {
            context.check_cancelled()?;
            self.reconcile_module(models, module, libraries, context)?;
            outcome.modules.push(module.name.clone());
        }
        Ok(outcome)
    }

    /// Path of the module file for a module name.
    pub fn module_file_path(&self, name: &str) -> NormalizedPath {
        self.modules_dir
            .join(&format!("{name}.{MODULE_FILE_EXTENSION}"))
    }

    fn remove_stale(
        &self,
        models: &mut dyn ModifiableModels,
        wanted: &HashSet<&str>,
    ) -> Result<usize> {
        let mut removed = 0;
        for module in models.all_modules() {
            if !wanted.contains(module.name.as_str()) {
                tracing::debug!(module = %module.name, "Disposing stale module");
                models.dispose_module(module.handle)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// absent -> created -> populated -> committed
    fn reconcile_module(
        &self,
        models: &mut dyn ModifiableModels,
        module: &desired::Module,
        libraries: &LibraryIndex,
        context: &mut SyncContext,
    ) -> Result<ModuleHandle> {
        let module_type = map_module_type(&*models, module)?;
        let handle = models.new_module(&self.module_file_path(&module.name), &module_type)?;
        tracing::debug!(module = %module.name, %handle, "Created module");

        let mut roots = models.module_roots(handle)?;
        roots.inherit_sdk();
        // TODO: diff content entries instead of rebuilding them, so host-side
        //  caches keyed on content entry identity survive a sync.
        let previous: Vec<String> = roots
            .content_entries()
            .iter()
            .map(|entry| entry.url().to_string())
            .collect();
        for url in &previous {
            roots.remove_content_entry(url);
        }
        roots.remove_library_entries();

        self.add_content_entries(&mut roots, module)?;
        self.add_libraries(&mut roots, module, libraries)?;

        let mut update = ModuleUpdate {
            module: handle,
            module_name: &module.name,
            roots: &mut roots,
            workspace_root: self.workspace_root,
            resource_directories: module.resource_directories.iter().cloned().collect(),
            source_packages: module.source_packages.iter().cloned().collect(),
            language_settings: self.language_settings,
        };
        self.plugins.update_project_structure(&mut update, context)?;

        tracing::debug!(
            module = %module.name,
            content_entries = roots.content_entries().len(),
            libraries = roots.library_entries().len(),
            "Committing module"
        );
        models.commit_module(handle, roots)?;
        Ok(handle)
    }

    fn add_content_entries(&self, roots: &mut ModuleRoots, module: &desired::Module) -> Result<()> {
        for spec in &module.content_entries {
            let base = self.content_base(module, spec.root.base)?;
            let entry = roots.add_content_entry(base.resolve(&spec.root.path).to_ide_url());

            for folder in &spec.sources {
                entry.add_source_folder(
                    base.resolve(&folder.path).to_ide_url(),
                    SourceRootType::for_test_flag(folder.is_test),
                    SourceRootProperties {
                        package_prefix: folder.package_prefix.clone(),
                        generated: folder.is_generated,
                    },
                );
            }
            // Excludes are always workspace-relative, whatever the entry's anchor
            for exclude in &spec.excludes {
                entry.add_exclude_folder(self.workspace_root.absolute_path_for(exclude).to_ide_url());
            }
        }
        Ok(())
    }

    fn add_libraries(
        &self,
        roots: &mut ModuleRoots,
        module: &desired::Module,
        libraries: &LibraryIndex,
    ) -> Result<()> {
        for name in &module.library_name {
            let library = libraries.get(name).ok_or_else(|| Error::MissingLibrary {
                module: module.name.clone(),
                library: name.clone(),
            })?;
            let entry = roots.add_library_entry(library, name.as_str());
            entry.scope = DependencyScope::Compile;
            entry.exported = false;
        }
        Ok(())
    }

    fn content_base(&self, module: &desired::Module, base: desired::Base) -> Result<&NormalizedPath> {
        match base {
            desired::Base::Project => Ok(self.project_base),
            desired::Base::Workspace => Ok(self.workspace_root.path()),
            desired::Base::Unrecognized => Err(Error::UnknownContentRootBase {
                module: module.name.clone(),
                base: format!("{base:?}"),
            }),
        }
    }
}

/// Host module type id for a snapshot module type.
pub fn map_module_type(models: &dyn ModifiableModels, module: &desired::Module) -> Result<String> {
    match module.module_type {
        desired::ModuleType::Default => Ok(models.default_module_type().to_string()),
        desired::ModuleType::Unrecognized => Err(Error::UnknownModuleType {
            module: module.name.clone(),
            module_type: format!("{:?}", module.module_type),
        }),
    }
}

/// Module names become module file names; the host reads the name back from
/// the file stem, so it must be a single path segment.
fn ensure_valid_module_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(Error::InvalidModuleName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn unique_module_names(modules: &[desired::Module]) -> Result<HashSet<&str>> {
    let mut names = HashSet::new();
    for module in modules {
        ensure_valid_module_name(&module.name)?;
        if !names.insert(module.name.as_str()) {
            return Err(Error::DuplicateModule {
                name: module.name.clone(),
            });
        }
    }
    Ok(names)
}
