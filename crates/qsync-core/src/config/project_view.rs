//! Project view parsing
//!
//! The project view names the parts of the workspace the user wants in the
//! IDE. It is the only input to query construction.

use crate::Result;
use qsync_query::QuerySpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Prefix marking a `directories` entry as an exclusion.
const EXCLUDE_PREFIX: char = '-';

/// Languages a workspace can have active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageClass {
    Generic,
    Java,
    Kotlin,
    Android,
    Scala,
}

/// The primary kind of the workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceType {
    #[default]
    Java,
    Android,
}

impl WorkspaceType {
    /// Languages a workspace of this type always has active.
    pub fn languages(self) -> &'static [LanguageClass] {
        match self {
            Self::Java => &[LanguageClass::Java],
            Self::Android => &[LanguageClass::Android, LanguageClass::Java],
        }
    }
}

/// Resolved language settings, handed to sync plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceLanguageSettings {
    pub workspace_type: WorkspaceType,
    pub active_languages: BTreeSet<LanguageClass>,
}

impl WorkspaceLanguageSettings {
    pub fn new(
        workspace_type: WorkspaceType,
        additional: impl IntoIterator<Item = LanguageClass>,
    ) -> Self {
        let mut active_languages: BTreeSet<LanguageClass> =
            workspace_type.languages().iter().copied().collect();
        active_languages.insert(LanguageClass::Generic);
        active_languages.extend(additional);
        Self {
            workspace_type,
            active_languages,
        }
    }

    pub fn is_language_active(&self, language: LanguageClass) -> bool {
        self.active_languages.contains(&language)
    }
}

impl Default for WorkspaceLanguageSettings {
    fn default() -> Self {
        Self::new(WorkspaceType::default(), [])
    }
}

/// Parsed project view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    /// Workspace-relative directories imported with all sub-packages;
    /// entries starting with `-` are excluded instead
    #[serde(default)]
    pub directories: Vec<String>,

    /// Individual packages imported without sub-packages
    #[serde(default)]
    pub packages: Vec<String>,

    /// Individual packages excluded without sub-packages
    #[serde(default)]
    pub exclude_packages: Vec<String>,

    #[serde(default)]
    pub workspace_type: WorkspaceType,

    #[serde(default)]
    pub additional_languages: Vec<LanguageClass>,
}

impl ProjectView {
    /// Parse a project view from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let view: ProjectView = toml::from_str(content)?;
        Ok(view)
    }

    /// Directories to import, in declaration order.
    pub fn included_directories(&self) -> impl Iterator<Item = &str> {
        self.directories
            .iter()
            .map(String::as_str)
            .filter(|dir| !dir.starts_with(EXCLUDE_PREFIX))
    }

    /// Directories to carve out of the imported ones, in declaration order.
    pub fn excluded_directories(&self) -> impl Iterator<Item = &str> {
        self.directories
            .iter()
            .filter_map(|dir| dir.strip_prefix(EXCLUDE_PREFIX))
    }

    /// The query that fetches the build graph for this view.
    pub fn query_spec(&self) -> QuerySpec {
        let mut builder = QuerySpec::builder();
        for dir in self.included_directories() {
            builder = builder.include_path(dir);
        }
        for dir in self.excluded_directories() {
            builder = builder.exclude_path(dir);
        }
        builder
            .include_packages(&self.packages)
            .exclude_packages(&self.exclude_packages)
            .build()
    }

    pub fn language_settings(&self) -> WorkspaceLanguageSettings {
        WorkspaceLanguageSettings::new(
            self.workspace_type,
            self.additional_languages.iter().copied(),
        )
    }
}
