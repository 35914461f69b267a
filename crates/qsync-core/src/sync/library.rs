//! Library reconciliation
//!
//! Brings the project library table in line with the snapshot's libraries:
//! unreferenced libraries are removed, existing ones are reused by name, and
//! each library's jar-directory roots are diffed against the desired set.

use crate::model::{LibraryHandle, LibraryModel, ModifiableModels};
use crate::{Error, Result};
use qsync_fs::NormalizedPath;
use qsync_project as desired;
use std::collections::{HashMap, HashSet};

/// Name to handle mapping of the reconciled libraries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryIndex {
    by_name: HashMap<String, LibraryHandle>,
}

impl LibraryIndex {
    pub fn get(&self, name: &str) -> Option<LibraryHandle> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn insert(&mut self, name: &str, handle: LibraryHandle) {
        self.by_name.insert(name.to_string(), handle);
    }
}

/// Result of reconciling the library table.
#[derive(Debug, Clone, Default)]
pub struct LibraryOutcome {
    pub index: LibraryIndex,
    /// Libraries deleted because the snapshot no longer names them
    pub removed: usize,
    /// Libraries whose roots were changed
    pub updated: usize,
}

/// Root changes needed to make one library match its desired jar directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootDiff {
    /// Urls to remove
    pub remove: Vec<String>,
    /// Jar directories to add, with their recursive flag
    pub add: Vec<(String, bool)>,
}

impl RootDiff {
    /// Diff a staged library against desired jar directories, in desired order.
    ///
    /// A live root is kept only if it is a jar directory that is desired with
    /// the same recursive flag. Anything else live is removed; anything
    /// desired and not kept is added, keeping the desired order.
    pub fn compute(model: &LibraryModel, desired: &[(String, bool)]) -> Self {
        let wanted: HashMap<&str, bool> = desired
            .iter()
            .map(|(url, recursive)| (url.as_str(), *recursive))
            .collect();
        let mut found = HashSet::new();
        let mut remove = Vec::new();
        for url in model.urls() {
            let keep = match (model.jar_directory_recursive(url), wanted.get(url)) {
                (Some(live), Some(wanted)) => live == *wanted,
                _ => false,
            };
            if keep {
                found.insert(url);
            } else {
                remove.push(url.to_string());
            }
        }

        let add = desired
            .iter()
            .filter(|(url, _)| !found.contains(url.as_str()))
            .cloned()
            .collect();

        Self { remove, add }
    }

    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }

    pub fn apply(&self, model: &mut LibraryModel) {
        for url in &self.remove {
            model.remove_root(url);
        }
        for (url, recursive) in &self.add {
            model.add_jar_directory(url.clone(), *recursive);
        }
    }
}

/// Reconciles the project library table.
pub struct LibraryReconciler {
    /// Jar directory paths in the snapshot are relative to this directory
    project_base: NormalizedPath,
}

impl LibraryReconciler {
    pub fn new(project_base: NormalizedPath) -> Self {
        Self { project_base }
    }

    /// Reconcile all libraries.
    ///
    /// Every library is fully committed before this returns, so the index
    /// can be used to attach libraries to modules.
    pub fn reconcile(
        &self,
        models: &mut dyn ModifiableModels,
        libraries: &[desired::Library],
    ) -> Result<LibraryOutcome> {
        ensure_unique_names(libraries)?;
        let mut outcome = LibraryOutcome {
            removed: self.remove_unused(models, libraries)?,
            ..Default::default()
        };

        for library in libraries {
            let (handle, changed) = self.get_or_create(models, library)?;
            outcome.index.insert(&library.name, handle);
            if changed {
                outcome.updated += 1;
            }
        }

        tracing::debug!(
            libraries = outcome.index.len(),
            removed = outcome.removed,
            updated = outcome.updated,
            "Reconciled libraries"
        );
        Ok(outcome)
    }

    /// Remove every library the snapshot does not name.
    fn remove_unused(
        &self,
        models: &mut dyn ModifiableModels,
        libraries: &[desired::Library],
    ) -> Result<usize> {
        let keep: HashSet<&str> = libraries.iter().map(|lib| lib.name.as_str()).collect();
        let mut removed = 0;
        for library in models.all_libraries() {
            if !keep.contains(library.name.as_str()) {
                tracing::debug!(library = %library.name, "Removing unused library");
                models.remove_library(library.handle)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Reuse or create a library and bring its roots up to date.
    ///
    /// Returns the handle and whether the library's roots changed.
    fn get_or_create(
        &self,
        models: &mut dyn ModifiableModels,
        library: &desired::Library,
    ) -> Result<(LibraryHandle, bool)> {
        let handle = match models.library_by_name(&library.name) {
            Some(handle) => handle,
            None => {
                tracing::debug!(library = %library.name, "Creating library");
                models.create_library(&library.name)?
            }
        };

        let wanted = self.jar_directory_urls(library)?;
        let mut model = models.library_model(handle)?;
        let diff = RootDiff::compute(&model, &wanted);
        if diff.is_empty() {
            return Ok((handle, false));
        }

        tracing::debug!(
            library = %library.name,
            removed = diff.remove.len(),
            added = diff.add.len(),
            "Updating library roots"
        );
        diff.apply(&mut model);
        models.commit_library(handle, model)?;
        Ok((handle, true))
    }

    /// Desired jar directories as resolved urls, in snapshot order.
    ///
    /// Two entries resolving to the same url are a snapshot inconsistency.
    fn jar_directory_urls(&self, library: &desired::Library) -> Result<Vec<(String, bool)>> {
        let mut seen = HashSet::new();
        let mut urls = Vec::with_capacity(library.classes_jar.len());
        for dir in &library.classes_jar {
            let url = self.project_base.resolve(&dir.path).to_ide_url();
            if !seen.insert(url.clone()) {
                return Err(Error::DuplicateJarDirectory {
                    library: library.name.clone(),
                    url,
                });
            }
            urls.push((url, dir.recursive));
        }
        Ok(urls)
    }
}

fn ensure_unique_names(libraries: &[desired::Library]) -> Result<()> {
    let mut seen = HashSet::new();
    for library in libraries {
        if !seen.insert(library.name.as_str()) {
            return Err(Error::DuplicateLibrary {
                name: library.name.clone(),
            });
        }
    }
    Ok(())
}
