//! Sync orchestration

use super::library::LibraryReconciler;
use super::module::ModuleReconciler;
use super::SyncContext;
use crate::config::{ImportSettings, ProjectView, WorkspaceLanguageSettings};
use crate::model::ModifiableModels;
use crate::plugin::PluginRegistry;
use crate::{Result, SyncTransaction};
use qsync_fs::{NormalizedPath, WorkspaceRoot};
use qsync_project::{Project, ProjectSnapshot};
use serde::{Deserialize, Serialize};

/// Report from one successful sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Libraries removed because the snapshot no longer names them
    pub removed_libraries: usize,
    /// Modules disposed because the snapshot no longer names them
    pub removed_modules: usize,
    /// Libraries whose roots changed
    pub updated_libraries: usize,
    /// Reconciled library names, in snapshot order
    pub libraries: Vec<String>,
    /// Reconciled module names, in snapshot order
    pub modules: Vec<String>,
    /// User-visible output recorded during the sync
    pub messages: Vec<String>,
}

impl SyncReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Receives freshly built snapshots from the query runner.
pub trait ProjectListener {
    fn graph_created(&self, context: &mut SyncContext, snapshot: &ProjectSnapshot) -> Result<()>;
}

/// Applies snapshots to the live project model of one IDE project.
pub struct ProjectUpdater<H> {
    host: H,
    project_base: NormalizedPath,
    workspace_root: WorkspaceRoot,
    modules_dir: NormalizedPath,
    project_view: ProjectView,
    language_settings: WorkspaceLanguageSettings,
    plugins: PluginRegistry,
}

impl<H: SyncTransaction> ProjectUpdater<H> {
    pub fn new(
        host: H,
        settings: &ImportSettings,
        project_view: ProjectView,
        plugins: PluginRegistry,
    ) -> Result<Self> {
        let language_settings = project_view.language_settings();
        Ok(Self {
            host,
            project_base: settings.project_base(),
            workspace_root: settings.workspace()?,
            modules_dir: settings.modules_dir()?,
            project_view,
            language_settings,
            plugins,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn project_view(&self) -> &ProjectView {
        &self.project_view
    }

    /// Reconcile the live model against `project` in one transaction.
    ///
    /// On error the transaction rolls back and the live model is unchanged.
    pub fn update_project_model(
        &self,
        project: &Project,
        context: &mut SyncContext,
    ) -> Result<SyncReport> {
        tracing::info!(
            libraries = project.libraries.len(),
            modules = project.modules.len(),
            "Updating project model"
        );
        let mut report = self
            .host
            .run(|models| self.apply(models, project, context))?;
        report.messages = context.messages().to_vec();

        tracing::info!(
            removed_libraries = report.removed_libraries,
            removed_modules = report.removed_modules,
            modules = report.modules.len(),
            "Project model updated"
        );
        Ok(report)
    }

    fn apply(
        &self,
        models: &mut dyn ModifiableModels,
        project: &Project,
        context: &mut SyncContext,
    ) -> Result<SyncReport> {
        self.plugins
            .update_project_sdk(models, context, &self.project_view)?;

        let libraries =
            LibraryReconciler::new(self.project_base.clone()).reconcile(models, &project.libraries)?;
        if libraries.removed > 0 {
            tracing::warn!(count = libraries.removed, "Removed unused libraries");
            context.output(format!("Removed {} libs", libraries.removed));
        }

        let modules = ModuleReconciler::new(
            &self.project_base,
            &self.workspace_root,
            &self.modules_dir,
            &self.plugins,
            &self.language_settings,
        )
        .reconcile(models, &project.modules, &libraries.index, context)?;
        if modules.removed > 0 {
            tracing::warn!(count = modules.removed, "Disposed stale modules");
        }

        context.check_cancelled()?;
        Ok(SyncReport {
            removed_libraries: libraries.removed,
            removed_modules: modules.removed,
            updated_libraries: libraries.updated,
            libraries: project.library_names().map(str::to_string).collect(),
            modules: modules.modules,
            messages: Vec::new(),
        })
    }
}

impl<H: SyncTransaction> ProjectListener for ProjectUpdater<H> {
    fn graph_created(&self, context: &mut SyncContext, snapshot: &ProjectSnapshot) -> Result<()> {
        tracing::debug!(query = %snapshot.query_spec.query_expression(), "Build graph created");
        self.update_project_model(snapshot.project(), context)
            .map(|_| ())
    }
}

impl<H> std::fmt::Debug for ProjectUpdater<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectUpdater")
            .field("project_base", &self.project_base)
            .field("workspace_root", &self.workspace_root)
            .field("modules_dir", &self.modules_dir)
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}
