//! Snapshot record types
//!
//! Field names follow the build-graph protocol's snake_case JSON form.
//! Enum values the protocol may grow are decoded leniently into an
//! `Unrecognized` variant; rejecting them is the reconciler's job, since an
//! unknown value means the snapshot producer and this consumer disagree.

use serde::{Deserialize, Serialize};

/// The desired structure of the whole IDE project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Libraries in the order they should be reconciled
    #[serde(default)]
    pub libraries: Vec<Library>,
    /// Modules in the order they should be reconciled
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Project {
    /// Look up a library by its unique name.
    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.iter().find(|library| library.name == name)
    }

    /// Look up a module by its unique name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.name == name)
    }

    pub fn library_names(&self) -> impl Iterator<Item = &str> {
        self.libraries.iter().map(|library| library.name.as_str())
    }
}

/// A named set of jar directories placed on the classpath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    /// Jar directories, relative to the IDE project base directory
    #[serde(default)]
    pub classes_jar: Vec<JarDirectory>,
}

/// A directory whose jars are treated as compiled dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarDirectory {
    pub path: String,
    #[serde(default)]
    pub recursive: bool,
}

/// Module kinds the snapshot can request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleType {
    #[default]
    #[serde(rename = "MODULE_TYPE_DEFAULT")]
    Default,
    #[serde(other)]
    Unrecognized,
}

/// A module and everything attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default, rename = "type")]
    pub module_type: ModuleType,
    /// Names of libraries this module depends on; each must appear in
    /// [`Project::libraries`]
    #[serde(default)]
    pub library_name: Vec<String>,
    #[serde(default)]
    pub content_entries: Vec<ContentEntry>,
    /// Workspace-relative resource directories, handed to sync plugins
    #[serde(default)]
    pub resource_directories: Vec<String>,
    /// Source packages, handed to sync plugins
    #[serde(default)]
    pub source_packages: Vec<String>,
}

/// The anchor a content root path is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Base {
    /// The IDE project's base directory
    Project,
    /// The build workspace root
    Workspace,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRoot {
    pub base: Base,
    #[serde(default)]
    pub path: String,
}

/// A root directory attached to a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub root: ContentRoot,
    #[serde(default)]
    pub sources: Vec<SourceFolder>,
    /// Workspace-relative paths excluded from indexing
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// A source folder inside a content entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFolder {
    /// Path relative to the content entry's base anchor
    pub path: String,
    #[serde(default)]
    pub package_prefix: String,
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default)]
    pub is_test: bool,
}
