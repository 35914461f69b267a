//! Import settings for one IDE project

use super::ProjectView;
use crate::{Error, Result};
use qsync_fs::{NormalizedPath, WorkspaceRoot};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform cache dir used when no data dir is configured.
const DATA_DIR_NAME: &str = "querysync";

/// Where the IDE project and its build workspace live.
///
/// ```toml
/// project_name = "app"
/// project_dir = "/home/me/ide/app"
/// workspace_root = "/home/me/src/ws"
/// project_view = ".qsyncproject"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    pub project_name: String,

    /// The IDE project's base directory
    pub project_dir: PathBuf,

    /// Root of the build workspace
    pub workspace_root: PathBuf,

    /// Storage for generated module files; defaults to a per-project
    /// directory under the platform cache dir
    #[serde(default)]
    pub project_data_dir: Option<PathBuf>,

    /// Project view file, relative to `project_dir` unless absolute
    #[serde(default)]
    pub project_view: Option<PathBuf>,
}

impl ImportSettings {
    /// Parse import settings from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: ImportSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse an import settings file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(Error::Config {
                message: "project_name must not be empty".to_string(),
            });
        }
        if !self.project_dir.is_absolute() {
            return Err(Error::Config {
                message: format!("project_dir must be absolute: {}", self.project_dir.display()),
            });
        }
        Ok(())
    }

    pub fn project_base(&self) -> NormalizedPath {
        NormalizedPath::new(&self.project_dir)
    }

    pub fn workspace(&self) -> Result<WorkspaceRoot> {
        Ok(WorkspaceRoot::new(&self.workspace_root)?)
    }

    /// The project data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.project_data_dir {
            return Ok(self.project_dir.join(dir));
        }
        dirs::cache_dir()
            .map(|cache| cache.join(DATA_DIR_NAME).join(&self.project_name))
            .ok_or_else(|| Error::Config {
                message: "no project_data_dir configured and no platform cache dir".to_string(),
            })
    }

    /// Directory holding one file per generated module.
    pub fn modules_dir(&self) -> Result<NormalizedPath> {
        Ok(NormalizedPath::new(self.data_dir()?.join("modules")))
    }

    /// Load the project view this project imports.
    ///
    /// A project without a view file imports nothing.
    pub fn load_project_view(&self) -> Result<ProjectView> {
        let Some(view) = &self.project_view else {
            return Ok(ProjectView::default());
        };
        let path = self.project_dir.join(view);
        if !path.exists() {
            return Err(Error::ConfigNotFound { path });
        }
        ProjectView::parse(&std::fs::read_to_string(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = r#"
project_name = "app"
project_dir = "/ide/app"
workspace_root = "/src/ws"
project_data_dir = ".qsync"
"#;

    #[test]
    fn parses_and_derives_paths() {
        let settings = ImportSettings::parse(SETTINGS).unwrap();

        assert_eq!(settings.project_base().as_str(), "/ide/app");
        assert_eq!(settings.workspace().unwrap().path().as_str(), "/src/ws");
        assert_eq!(settings.modules_dir().unwrap().as_str(), "/ide/app/.qsync/modules");
    }

    #[test]
    fn absolute_data_dir_is_used_verbatim() {
        let settings = ImportSettings::parse(
            r#"
project_name = "app"
project_dir = "/ide/app"
workspace_root = "/src/ws"
project_data_dir = "/var/qsync/app"
"#,
        )
        .unwrap();
        assert_eq!(settings.data_dir().unwrap(), PathBuf::from("/var/qsync/app"));
    }

    #[test]
    fn rejects_relative_project_dir() {
        let err = ImportSettings::parse(
            r#"
project_name = "app"
project_dir = "ide/app"
workspace_root = "/src/ws"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn relative_workspace_root_is_an_error() {
        let settings = ImportSettings::parse(
            r#"
project_name = "app"
project_dir = "/ide/app"
workspace_root = "src/ws"
"#,
        )
        .unwrap();
        assert!(matches!(settings.workspace(), Err(Error::Fs(_))));
    }

    #[test]
    fn missing_view_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ImportSettings {
            project_name: "app".to_string(),
            project_dir: dir.path().to_path_buf(),
            workspace_root: dir.path().to_path_buf(),
            project_data_dir: None,
            project_view: Some(PathBuf::from(".qsyncproject")),
        };
        assert!(matches!(
            settings.load_project_view(),
            Err(Error::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn load_reads_settings_and_view() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".qsyncproject"),
            "directories = [\"java\"]\n",
        )
        .unwrap();
        let settings_path = dir.path().join("import.toml");
        std::fs::write(
            &settings_path,
            format!(
                "project_name = \"app\"\nproject_dir = {:?}\nworkspace_root = \"/src/ws\"\nproject_view = \".qsyncproject\"\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();

        let settings = ImportSettings::load(&settings_path).unwrap();
        let view = settings.load_project_view().unwrap();
        assert_eq!(view.directories, ["java"]);
    }
}
