//! Build-graph query construction for querysync
//!
//! Turns the package roots a project wants (and the roots it wants carved
//! out) into the exact argument list handed to the build tool's `query`
//! command. The argument list is a pure function of the spec and is computed
//! once per spec, so it can be used directly as a cache key.
//!
//! # Example
//!
//! ```
//! use qsync_query::QuerySpec;
//!
//! let spec = QuerySpec::builder()
//!     .include_path("java/com/app")
//!     .exclude_path("java/com/app/experimental")
//!     .build();
//!
//! assert_eq!(
//!     spec.query_args()[0],
//!     "(//java/com/app/...:* - //java/com/app/experimental/...:*)"
//! );
//! ```

mod pattern;
mod spec;

pub use pattern::{TargetPattern, package_pattern, recursive_pattern};
pub use spec::{OUTPUT_FLAGS, QuerySpec, QuerySpecBuilder};
