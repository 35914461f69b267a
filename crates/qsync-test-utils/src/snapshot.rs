//! Builders for [`ProjectSnapshot`]s.
//!
//! ```rust
//! use qsync_test_utils::{LibraryBuilder, ModuleBuilder, SnapshotBuilder};
//!
//! let snapshot = SnapshotBuilder::new()
//!     .library(LibraryBuilder::new("deps").jar_directory("libs/a", true))
//!     .module(
//!         ModuleBuilder::new(".workspace")
//!             .workspace_content("java/com/app")
//!             .library("deps"),
//!     )
//!     .build();
//!
//! assert_eq!(snapshot.project.modules[0].library_name, ["deps"]);
//! ```

use qsync_project::{
    Base, ContentEntry, ContentRoot, JarDirectory, Library, Module, ModuleType, Project,
    ProjectSnapshot, SourceFolder,
};
use qsync_query::QuerySpec;

/// Builds a [`ProjectSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    query_spec: QuerySpec,
    project: Project,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_spec(mut self, query_spec: QuerySpec) -> Self {
        self.query_spec = query_spec;
        self
    }

    pub fn library(mut self, library: LibraryBuilder) -> Self {
        self.project.libraries.push(library.build());
        self
    }

    pub fn module(mut self, module: ModuleBuilder) -> Self {
        self.project.modules.push(module.build());
        self
    }

    pub fn project(self) -> Project {
        self.project
    }

    pub fn build(self) -> ProjectSnapshot {
        ProjectSnapshot::new(self.query_spec, self.project)
    }
}

/// Builds a snapshot [`Library`].
#[derive(Debug, Clone)]
pub struct LibraryBuilder {
    library: Library,
}

impl LibraryBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            library: Library {
                name: name.to_string(),
                classes_jar: Vec::new(),
            },
        }
    }

    /// Add a jar directory, relative to the IDE project base.
    pub fn jar_directory(mut self, path: &str, recursive: bool) -> Self {
        self.library.classes_jar.push(JarDirectory {
            path: path.to_string(),
            recursive,
        });
        self
    }

    pub fn build(self) -> Library {
        self.library
    }
}

/// Builds a snapshot [`Module`].
///
/// Source folders and excludes attach to the most recently added content
/// entry; adding one before any content entry panics.
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            module: Module {
                name: name.to_string(),
                module_type: ModuleType::Default,
                library_name: Vec::new(),
                content_entries: Vec::new(),
                resource_directories: Vec::new(),
                source_packages: Vec::new(),
            },
        }
    }

    pub fn module_type(mut self, module_type: ModuleType) -> Self {
        self.module.module_type = module_type;
        self
    }

    pub fn content(mut self, base: Base, path: &str) -> Self {
        self.module.content_entries.push(ContentEntry {
            root: ContentRoot {
                base,
                path: path.to_string(),
            },
            sources: Vec::new(),
            excludes: Vec::new(),
        });
        self
    }

    pub fn workspace_content(self, path: &str) -> Self {
        self.content(Base::Workspace, path)
    }

    pub fn project_content(self, path: &str) -> Self {
        self.content(Base::Project, path)
    }

    pub fn source(self, path: &str, package_prefix: &str) -> Self {
        self.source_folder(SourceFolder {
            path: path.to_string(),
            package_prefix: package_prefix.to_string(),
            ..Default::default()
        })
    }

    pub fn test_source(self, path: &str, package_prefix: &str) -> Self {
        self.source_folder(SourceFolder {
            path: path.to_string(),
            package_prefix: package_prefix.to_string(),
            is_test: true,
            ..Default::default()
        })
    }

    pub fn source_folder(mut self, folder: SourceFolder) -> Self {
        self.last_entry().sources.push(folder);
        self
    }

    pub fn exclude(mut self, path: &str) -> Self {
        self.last_entry().excludes.push(path.to_string());
        self
    }

    pub fn library(mut self, name: &str) -> Self {
        self.module.library_name.push(name.to_string());
        self
    }

    pub fn resource_directory(mut self, path: &str) -> Self {
        self.module.resource_directories.push(path.to_string());
        self
    }

    pub fn source_package(mut self, package: &str) -> Self {
        self.module.source_packages.push(package.to_string());
        self
    }

    pub fn build(self) -> Module {
        self.module
    }

    fn last_entry(&mut self) -> &mut ContentEntry {
        self.module
            .content_entries
            .last_mut()
            .expect("ModuleBuilder: add a content entry first")
    }
}
