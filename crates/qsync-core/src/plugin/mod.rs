//! Sync plugins
//!
//! Language-specific augmentation of the project model. Plugins are passed
//! to the updater as an explicit, ordered [`PluginRegistry`]; there is no
//! global discovery. Each plugin runs after core reconciliation of a module
//! and before that module is committed.

mod resources;

pub use resources::ResourceRootsPlugin;

use crate::{Error, Result};
use crate::config::{ProjectView, WorkspaceLanguageSettings};
use crate::model::{ModifiableModels, ModuleHandle, ModuleRoots};
use crate::sync::SyncContext;
use qsync_fs::WorkspaceRoot;
use std::collections::BTreeSet;

/// Everything a plugin may read or change for one module.
pub struct ModuleUpdate<'a> {
    pub module: ModuleHandle,
    pub module_name: &'a str,
    /// Staged roots of the module; committed after all plugins ran
    pub roots: &'a mut ModuleRoots,
    pub workspace_root: &'a WorkspaceRoot,
    /// Workspace-relative resource directories from the snapshot
    pub resource_directories: BTreeSet<String>,
    /// Source packages from the snapshot
    pub source_packages: BTreeSet<String>,
    pub language_settings: &'a WorkspaceLanguageSettings,
}

/// A language-specific sync hook.
///
/// Hooks must not depend on each other's side effects; the only ordering
/// guarantee is registration order. Errors a hook returns reach the caller
/// as [`Error::Plugin`] naming the hook, except [`Error::Cancelled`].
pub trait SyncPlugin: Send + Sync {
    /// Identifier used in logs and errors.
    fn name(&self) -> &str;

    /// Adjust project-level SDK settings before any reconciliation.
    fn update_project_sdk(
        &self,
        _models: &mut dyn ModifiableModels,
        _context: &mut SyncContext,
        _project_view: &ProjectView,
    ) -> Result<()> {
        Ok(())
    }

    /// Add structure to a freshly reconciled module.
    fn update_project_structure(
        &self,
        _update: &mut ModuleUpdate<'_>,
        _context: &mut SyncContext,
    ) -> Result<()> {
        Ok(())
    }
}

/// Ordered list of plugins invoked during a sync.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn SyncPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the plugins shipped in this crate.
    pub fn with_builtins() -> Self {
        Self::new().with(ResourceRootsPlugin)
    }

    /// Append a plugin.
    pub fn register(&mut self, plugin: impl SyncPlugin + 'static) {
        self.plugins.push(Box::new(plugin));
    }

    pub fn with(mut self, plugin: impl SyncPlugin + 'static) -> Self {
        self.register(plugin);
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub(crate) fn update_project_sdk(
        &self,
        models: &mut dyn ModifiableModels,
        context: &mut SyncContext,
        project_view: &ProjectView,
    ) -> Result<()> {
        for plugin in &self.plugins {
            tracing::debug!(plugin = plugin.name(), "Updating project SDK");
            plugin
                .update_project_sdk(models, context, project_view)
                .map_err(|e| plugin_error(plugin.as_ref(), e))
                .inspect_err(|e| tracing::error!(plugin = plugin.name(), error = %e, "SDK update failed"))?;
        }
        Ok(())
    }

    pub(crate) fn update_project_structure(
        &self,
        update: &mut ModuleUpdate<'_>,
        context: &mut SyncContext,
    ) -> Result<()> {
        for plugin in &self.plugins {
            tracing::debug!(
                plugin = plugin.name(),
                module = update.module_name,
                "Updating module structure"
            );
            plugin
                .update_project_structure(update, context)
                .map_err(|e| plugin_error(plugin.as_ref(), e))
                .inspect_err(|e| {
                    tracing::error!(plugin = plugin.name(), error = %e, "Module update failed")
                })?;
        }
        Ok(())
    }
}

/// Attribute a plugin failure to the plugin that raised it.
///
/// Cancellation and errors already naming a plugin pass through unchanged.
fn plugin_error(plugin: &dyn SyncPlugin, error: Error) -> Error {
    match error {
        Error::Cancelled | Error::Plugin { .. } => error,
        other => Error::Plugin {
            plugin: plugin.name().to_string(),
            message: other.to_string(),
        },
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}
