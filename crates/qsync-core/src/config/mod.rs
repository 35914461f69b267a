//! Import settings and project view
//!
//! Two TOML documents configure a sync:
//!
//! - **Import settings** (`ImportSettings`): where the IDE project, the build
//!   workspace and the project data directory live.
//! - **Project view** (`ProjectView`): which directories and packages to
//!   import, and which languages are active.
//!
//! # Example
//!
//! ```
//! use qsync_core::config::ProjectView;
//!
//! let view = ProjectView::parse(r#"
//! directories = ["java/com/app", "-java/com/app/experimental"]
//! workspace_type = "java"
//! "#).unwrap();
//!
//! assert_eq!(
//!     view.query_spec().query_expression(),
//!     "(//java/com/app/...:* - //java/com/app/experimental/...:*)"
//! );
//! ```

mod import;
mod project_view;

pub use import::ImportSettings;
pub use project_view::{LanguageClass, ProjectView, WorkspaceLanguageSettings, WorkspaceType};
