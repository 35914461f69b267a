//! [`TestWorkspace`]: a temporary build workspace and IDE project.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding `workspace/` (the build workspace root) and
/// `project/` (the IDE project directory).
///
/// # Example
///
/// ```rust
/// use qsync_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_project_view("directories = [\"java\"]\n");
/// let settings = ws.settings_toml("app");
/// assert!(settings.contains("project_name = \"app\""));
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// File name of the project view written by [`Self::write_project_view`].
    pub const PROJECT_VIEW: &'static str = ".qsyncproject";

    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("workspace")).unwrap();
        fs::create_dir_all(temp_dir.path().join("project")).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn workspace_root(&self) -> PathBuf {
        self.root().join("workspace")
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root().join("project")
    }

    /// Create a directory (and parents) inside the build workspace.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.workspace_root().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write the project view file into the IDE project directory.
    pub fn write_project_view(&self, content: &str) -> PathBuf {
        let path = self.project_dir().join(Self::PROJECT_VIEW);
        fs::write(&path, content).unwrap();
        path
    }

    /// Import settings TOML pointing at this layout.
    ///
    /// Module files go to `project/.qsync`.
    pub fn settings_toml(&self, project_name: &str) -> String {
        format!(
            "project_name = \"{project_name}\"\n\
             project_dir = \"{}\"\n\
             workspace_root = \"{}\"\n\
             project_data_dir = \".qsync\"\n\
             project_view = \"{}\"\n",
            toml_path(&self.project_dir()),
            toml_path(&self.workspace_root()),
            Self::PROJECT_VIEW,
        )
    }

    /// Write the import settings file into the IDE project directory.
    pub fn write_settings(&self, project_name: &str) -> PathBuf {
        let path = self.project_dir().join("import.toml");
        fs::write(&path, self.settings_toml(project_name)).unwrap();
        path
    }
}

/// Path as a TOML basic-string body.
fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
