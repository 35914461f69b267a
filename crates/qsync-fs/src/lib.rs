//! Filesystem path helpers for querysync
//!
//! Provides forward-slash normalized paths, lexical resolution against a base
//! directory, and conversion to the URL form the IDE project model keys on.

pub mod error;
pub mod path;
pub mod workspace;

pub use error::{Error, Result};
pub use path::{NormalizedPath, path_to_ide_url};
pub use workspace::WorkspaceRoot;
