//! The snapshot handed over after a query run

use crate::error::{Error, Result};
use crate::model::Project;
use qsync_query::QuerySpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output of one build-graph query, ready for reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// The query that produced this snapshot
    #[serde(default)]
    pub query_spec: QuerySpec,
    /// Desired project structure
    pub project: Project,
}

impl ProjectSnapshot {
    pub fn new(query_spec: QuerySpec, project: Project) -> Self {
        Self {
            query_spec,
            project,
        }
    }

    /// Parse a snapshot from its JSON form.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            libraries = snapshot.project.libraries.len(),
            modules = snapshot.project.modules.len(),
            "Loaded project snapshot"
        );
        Ok(snapshot)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}
