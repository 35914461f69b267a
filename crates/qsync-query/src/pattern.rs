//! Target patterns understood by the query engine

use qsync_fs::NormalizedPath;
use std::fmt;
use std::path::Path;

/// A package-level target pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetPattern {
    /// `//<dir>/...`: the package at `dir` and every package beneath it
    Recursive(NormalizedPath),
    /// `//<pkg>`: exactly one package, no sub-packages
    Package(NormalizedPath),
}

impl TargetPattern {
    pub fn recursive(dir: impl AsRef<Path>) -> Self {
        Self::Recursive(NormalizedPath::new(dir))
    }

    pub fn package(pkg: impl AsRef<Path>) -> Self {
        Self::Package(NormalizedPath::new(pkg))
    }
}

impl fmt::Display for TargetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive(dir) => match package_label(dir) {
                "" => write!(f, "//..."),
                label => write!(f, "//{label}/..."),
            },
            Self::Package(pkg) => write!(f, "//{}", package_label(pkg)),
        }
    }
}

/// Pattern matching `dir` and all of its sub-packages.
pub fn recursive_pattern(dir: impl AsRef<Path>) -> String {
    TargetPattern::recursive(dir).to_string()
}

/// Pattern matching the single package at `pkg`.
pub fn package_pattern(pkg: impl AsRef<Path>) -> String {
    TargetPattern::package(pkg).to_string()
}

// Workspace-relative: a leading slash would turn `//` into `///`.
fn package_label(path: &NormalizedPath) -> &str {
    path.as_str().trim_start_matches('/')
}
