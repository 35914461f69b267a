//! Staged module roots

use super::LibraryHandle;

/// Whether a source folder holds production code, tests, or resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRootType {
    Source,
    TestSource,
    Resource,
}

impl SourceRootType {
    /// Root type for a snapshot source folder's test flag.
    pub fn for_test_flag(is_test: bool) -> Self {
        if is_test { Self::TestSource } else { Self::Source }
    }
}

/// Per-folder metadata passed through from the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRootProperties {
    pub package_prefix: String,
    pub generated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFolder {
    pub url: String,
    pub root_type: SourceRootType,
    pub properties: SourceRootProperties,
}

/// A content root with its source and exclude folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    url: String,
    source_folders: Vec<SourceFolder>,
    exclude_folders: Vec<String>,
}

impl ContentEntry {
    fn new(url: String) -> Self {
        Self {
            url,
            source_folders: Vec::new(),
            exclude_folders: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source_folders(&self) -> &[SourceFolder] {
        &self.source_folders
    }

    pub fn exclude_folders(&self) -> &[String] {
        &self.exclude_folders
    }

    pub fn add_source_folder(
        &mut self,
        url: impl Into<String>,
        root_type: SourceRootType,
        properties: SourceRootProperties,
    ) -> &SourceFolder {
        self.source_folders.push(SourceFolder {
            url: url.into(),
            root_type,
            properties,
        });
        &self.source_folders[self.source_folders.len() - 1]
    }

    pub fn add_exclude_folder(&mut self, url: impl Into<String>) {
        self.exclude_folders.push(url.into());
    }

    /// True if `url` is this entry's root or lies beneath it.
    pub fn contains_url(&self, url: &str) -> bool {
        url == self.url
            || url
                .strip_prefix(self.url.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Dependency scope of a library order entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DependencyScope {
    #[default]
    Compile,
    Test,
    Runtime,
    Provided,
}

/// A module's dependency on a project library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryOrderEntry {
    pub library: LibraryHandle,
    pub library_name: String,
    pub scope: DependencyScope,
    pub exported: bool,
}

/// Staged copy of a module's roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleRoots {
    inherit_sdk: bool,
    content_entries: Vec<ContentEntry>,
    library_entries: Vec<LibraryOrderEntry>,
}

impl ModuleRoots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inherits_sdk(&self) -> bool {
        self.inherit_sdk
    }

    /// Use the project SDK for this module.
    pub fn inherit_sdk(&mut self) {
        self.inherit_sdk = true;
    }

    pub fn content_entries(&self) -> &[ContentEntry] {
        &self.content_entries
    }

    pub fn content_entries_mut(&mut self) -> &mut [ContentEntry] {
        &mut self.content_entries
    }

    pub fn add_content_entry(&mut self, url: impl Into<String>) -> &mut ContentEntry {
        self.content_entries.push(ContentEntry::new(url.into()));
        let last = self.content_entries.len() - 1;
        &mut self.content_entries[last]
    }

    /// Remove a content entry by url. Returns false if it was absent.
    pub fn remove_content_entry(&mut self, url: &str) -> bool {
        let before = self.content_entries.len();
        self.content_entries.retain(|entry| entry.url != url);
        self.content_entries.len() != before
    }

    pub fn library_entries(&self) -> &[LibraryOrderEntry] {
        &self.library_entries
    }

    /// Attach a library with the default (compile, not exported) settings.
    pub fn add_library_entry(
        &mut self,
        library: LibraryHandle,
        library_name: impl Into<String>,
    ) -> &mut LibraryOrderEntry {
        self.library_entries.push(LibraryOrderEntry {
            library,
            library_name: library_name.into(),
            scope: DependencyScope::default(),
            exported: false,
        });
        let last = self.library_entries.len() - 1;
        &mut self.library_entries[last]
    }

    pub fn remove_library_entries(&mut self) {
        self.library_entries.clear();
    }
}
