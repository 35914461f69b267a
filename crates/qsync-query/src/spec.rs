//! Query specification and its argument list

use crate::pattern::TargetPattern;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Fixed output flags appended after the query expression.
pub const OUTPUT_FLAGS: [&str; 2] = ["--output=streamed_proto", "--relative_locations=true"];

/// Arguments to a single build-graph `query` invocation.
///
/// A spec is immutable once built. Its argument list is computed on first
/// use and reused afterwards; two equal specs always produce identical
/// argument lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Package patterns to include, in insertion order
    includes: Vec<String>,
    /// Package patterns subtracted from the includes, in insertion order
    excludes: Vec<String>,
    #[serde(skip)]
    query_args: OnceCell<Vec<String>>,
}

impl QuerySpec {
    /// A spec with no includes and no excludes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> QuerySpecBuilder {
        QuerySpecBuilder::default()
    }

    /// Build a spec from root directories (recursive) and exact packages.
    pub fn from_roots<P: AsRef<Path>>(
        include_paths: impl IntoIterator<Item = P>,
        exclude_paths: impl IntoIterator<Item = P>,
        include_packages: impl IntoIterator<Item = P>,
        exclude_packages: impl IntoIterator<Item = P>,
    ) -> Self {
        let mut builder = Self::builder();
        for path in include_paths {
            builder = builder.include_path(path);
        }
        for path in exclude_paths {
            builder = builder.exclude_path(path);
        }
        builder
            .include_packages(include_packages)
            .exclude_packages(exclude_packages)
            .build()
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// The argument list passed verbatim to the query executable.
    ///
    /// The first element is the target expression; `:*` on every pattern
    /// makes the query return every file in the matched packages, not just
    /// the rules, so file-level reachability can be computed from the output.
    pub fn query_args(&self) -> &[String] {
        self.query_args.get_or_init(|| {
            let expression = self.expression();
            tracing::debug!(%expression, "Computed query expression");
            let mut args = Vec::with_capacity(1 + OUTPUT_FLAGS.len());
            args.push(expression);
            args.extend(OUTPUT_FLAGS.iter().map(|flag| flag.to_string()));
            args
        })
    }

    /// The `(<includes> - <excludes>)` target expression.
    pub fn query_expression(&self) -> &str {
        &self.query_args()[0]
    }

    /// Hex SHA-256 over the argument list, for keying cached query output.
    pub fn cache_key(&self) -> String {
        let mut hasher = Sha256::new();
        for arg in self.query_args() {
            hasher.update(arg.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    fn expression(&self) -> String {
        let included = self
            .includes
            .iter()
            .map(|pattern| format!("{pattern}:*"))
            .collect::<Vec<_>>()
            .join(" + ");
        let excluded: String = self
            .excludes
            .iter()
            .map(|pattern| format!(" - {pattern}:*"))
            .collect();
        format!("({included}{excluded})")
    }
}

impl PartialEq for QuerySpec {
    fn eq(&self, other: &Self) -> bool {
        self.includes == other.includes && self.excludes == other.excludes
    }
}

impl Eq for QuerySpec {}

impl Hash for QuerySpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.includes.hash(state);
        self.excludes.hash(state);
    }
}

/// Builder for [`QuerySpec`].
///
/// Supports:
/// - paths: roots to query (or exclude) including all sub-packages
/// - packages: individual packages to query (or exclude) without sub-packages
///
/// Patterns keep their insertion order; a pattern added twice to the same
/// side is kept once. Includes and excludes may overlap: the subtraction is
/// evaluated by the query engine.
#[derive(Debug, Clone, Default)]
pub struct QuerySpecBuilder {
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl QuerySpecBuilder {
    pub fn include_path(mut self, include: impl AsRef<Path>) -> Self {
        push_unique(&mut self.includes, TargetPattern::recursive(include));
        self
    }

    pub fn exclude_path(mut self, exclude: impl AsRef<Path>) -> Self {
        push_unique(&mut self.excludes, TargetPattern::recursive(exclude));
        self
    }

    pub fn include_packages<P: AsRef<Path>>(
        mut self,
        packages: impl IntoIterator<Item = P>,
    ) -> Self {
        for package in packages {
            push_unique(&mut self.includes, TargetPattern::package(package));
        }
        self
    }

    pub fn exclude_packages<P: AsRef<Path>>(
        mut self,
        packages: impl IntoIterator<Item = P>,
    ) -> Self {
        for package in packages {
            push_unique(&mut self.excludes, TargetPattern::package(package));
        }
        self
    }

    pub fn build(self) -> QuerySpec {
        QuerySpec {
            includes: self.includes,
            excludes: self.excludes,
            query_args: OnceCell::new(),
        }
    }
}

fn push_unique(patterns: &mut Vec<String>, pattern: TargetPattern) {
    let pattern = pattern.to_string();
    if !patterns.contains(&pattern) {
        patterns.push(pattern);
    }
}
