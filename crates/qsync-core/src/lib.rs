//! Project structure reconciliation for querysync
//!
//! This crate applies a [`ProjectSnapshot`](qsync_project::ProjectSnapshot)
//! to a live IDE project model, implementing:
//!
//! - **Live model seam**: the [`ModifiableModels`] trait through which the
//!   host exposes its library table and modules, plus an in-memory host
//! - **SyncTransaction**: atomic, exclusive application of one sync
//! - **Reconcilers**: [`LibraryReconciler`] diffs libraries by name and
//!   classes roots, [`ModuleReconciler`] recreates every module from scratch
//! - **Plugins**: ordered language-specific hooks run inside the transaction
//! - **Configuration**: import settings and project view
//!
//! # Architecture
//!
//! ```text
//!                 qsync-core
//!                      |
//!        +-------------+-------------+
//!        |             |             |
//!    qsync-fs     qsync-query   qsync-project
//! ```
//!
//! # Example
//!
//! ```
//! use qsync_core::config::{ImportSettings, ProjectView};
//! use qsync_core::model::InMemoryProject;
//! use qsync_core::plugin::PluginRegistry;
//! use qsync_core::sync::{ProjectUpdater, SyncContext};
//! use qsync_project::Project;
//!
//! let settings = ImportSettings::parse(r#"
//! project_name = "app"
//! project_dir = "/ide/app"
//! workspace_root = "/src/ws"
//! project_data_dir = ".qsync"
//! "#).unwrap();
//!
//! let updater = ProjectUpdater::new(
//!     InMemoryProject::new(),
//!     &settings,
//!     ProjectView::default(),
//!     PluginRegistry::with_builtins(),
//! ).unwrap();
//!
//! let report = updater
//!     .update_project_model(&Project::default(), &mut SyncContext::new())
//!     .unwrap();
//! assert!(report.modules.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod plugin;
pub mod sync;
pub mod transaction;

pub use config::{ImportSettings, ProjectView, WorkspaceLanguageSettings};
pub use error::{Error, Result};
pub use model::{InMemoryProject, LibraryHandle, ModifiableModels, ModuleHandle};
pub use plugin::{PluginRegistry, SyncPlugin};
pub use sync::{
    LibraryReconciler, ModuleReconciler, ProjectListener, ProjectUpdater, SyncContext, SyncReport,
};
pub use transaction::SyncTransaction;
