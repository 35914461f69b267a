//! Shared test utilities for the querysync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`snapshot`]: builders for desired-state snapshots
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace), a temporary
//!   build workspace next to a temporary IDE project

pub mod snapshot;
pub mod workspace;

pub use snapshot::{LibraryBuilder, ModuleBuilder, SnapshotBuilder};
pub use workspace::TestWorkspace;
