//! Desired project structure for querysync
//!
//! A [`ProjectSnapshot`] is produced once per sync by the component that runs
//! the build-graph query and is consumed, never mutated, by the reconciler in
//! `qsync-core`. Only the fields the reconciler reads are modelled.

pub mod error;
mod model;
mod snapshot;

pub use error::{Error, Result};
pub use model::{
    Base, ContentEntry, ContentRoot, JarDirectory, Library, Module, ModuleType, Project,
    SourceFolder,
};
pub use snapshot::ProjectSnapshot;
