//! Reconciliation of the live project model against a snapshot
//!
//! [`ProjectUpdater`] drives one sync: plugin SDK hooks, then
//! [`LibraryReconciler`], then [`ModuleReconciler`], all inside a single
//! [`SyncTransaction`](crate::SyncTransaction). Libraries are reconciled
//! before modules because module library entries need committed handles.

mod context;
mod library;
mod module;
mod updater;

pub use context::{CancelHandle, SyncContext};
pub use library::{LibraryIndex, LibraryOutcome, LibraryReconciler, RootDiff};
pub use module::{MODULE_FILE_EXTENSION, ModuleOutcome, ModuleReconciler, map_module_type};
pub use updater::{ProjectListener, ProjectUpdater, SyncReport};
