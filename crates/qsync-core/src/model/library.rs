//! Staged library model

/// How a classes root contributes to the classpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// A single jar or class directory
    Plain,
    /// A directory whose jars are all on the classpath
    JarDirectory { recursive: bool },
}

/// One classes root of a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassesRoot {
    pub url: String,
    pub kind: RootKind,
}

/// Staged copy of a library's classes roots, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryModel {
    roots: Vec<ClassesRoot>,
}

impl LibraryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[ClassesRoot] {
        &self.roots
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(|root| root.url.as_str())
    }

    pub fn root(&self, url: &str) -> Option<&ClassesRoot> {
        self.roots.iter().find(|root| root.url == url)
    }

    pub fn is_jar_directory(&self, url: &str) -> bool {
        matches!(
            self.root(url),
            Some(ClassesRoot {
                kind: RootKind::JarDirectory { .. },
                ..
            })
        )
    }

    /// `Some(recursive)` when `url` is a jar directory.
    pub fn jar_directory_recursive(&self, url: &str) -> Option<bool> {
        match self.root(url)?.kind {
            RootKind::JarDirectory { recursive } => Some(recursive),
            RootKind::Plain => None,
        }
    }

    pub fn add_root(&mut self, url: impl Into<String>) {
        self.insert(url.into(), RootKind::Plain);
    }

    pub fn add_jar_directory(&mut self, url: impl Into<String>, recursive: bool) {
        self.insert(url.into(), RootKind::JarDirectory { recursive });
    }

    /// Remove a root. Returns false if `url` was not a root.
    pub fn remove_root(&mut self, url: &str) -> bool {
        let before = self.roots.len();
        self.roots.retain(|root| root.url != url);
        self.roots.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    // A url is a root at most once; re-adding replaces its kind in place.
    fn insert(&mut self, url: String, kind: RootKind) {
        match self.roots.iter_mut().find(|root| root.url == url) {
            Some(existing) => existing.kind = kind,
            None => self.roots.push(ClassesRoot { url, kind }),
        }
    }
}
