use crate::models::{ExportPresets, ProjectConfig, ToolSettings};
use crate::services::discovery;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// The configuration files of one project directory.
///
/// Manages two files:
/// - Project descriptor (`project.godot`)
/// - Export presets (`export_presets.cfg`), which a project may not have yet
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    root: Utf8PathBuf,
    project_path: Utf8PathBuf,
    presets_path: Utf8PathBuf,
}

impl ProjectFiles {
    /// Create a ProjectFiles rooted at the directory of `project_path`
    pub fn new<P: AsRef<Utf8Path>>(project_path: P, settings: &ToolSettings) -> Result<Self> {
        let project_path = project_path.as_ref().to_path_buf();
        let root = project_path
            .parent()
            .with_context(|| format!("Project file has no parent directory: {}", project_path))?
            .to_path_buf();

        Ok(Self {
            presets_path: root.join(&settings.presets_file),
            project_path,
            root,
        })
    }

    /// Locate the project and wrap its files
    pub fn discover(explicit: Option<&Utf8Path>, settings: &ToolSettings) -> Result<Self> {
        let project_path = discovery::find_project_file(explicit, settings)?;
        Self::new(project_path, settings)
    }

    /// Load the project descriptor.
    pub fn load_project(&self) -> Result<ProjectConfig> {
        let bytes = fs::read(&self.project_path)
            .with_context(|| format!("Failed to read project file: {}", self.project_path))?;

        let project = ProjectConfig::from_bytes(&bytes)
            .with_context(|| format!("Failed to parse project file: {}", self.project_path))?;

        tracing::info!("Loaded project file from {}", self.project_path);
        Ok(project)
    }

    pub fn save_project(&self, project: &ProjectConfig) -> Result<()> {
        let bytes = project
            .render()
            .with_context(|| format!("Failed to encode project file: {}", self.project_path))?;

        fs::write(&self.project_path, bytes)
            .with_context(|| format!("Failed to write project file: {}", self.project_path))?;

        tracing::info!("Saved project file to {}", self.project_path);
        Ok(())
    }

    /// Load the export presets.
    ///
    /// # Returns
    /// `None` if the project has no presets file
    pub fn load_presets(&self) -> Result<Option<ExportPresets>> {
        if !self.presets_path.exists() {
            tracing::warn!("Presets file not found at {}", self.presets_path);
            return Ok(None);
        }

        let bytes = fs::read(&self.presets_path)
            .with_context(|| format!("Failed to read presets file: {}", self.presets_path))?;

        let presets = ExportPresets::from_bytes(&bytes)
            .with_context(|| format!("Failed to parse presets file: {}", self.presets_path))?;

        tracing::info!("Loaded presets file from {}", self.presets_path);
        Ok(Some(presets))
    }

    pub fn save_presets(&self, presets: &ExportPresets) -> Result<()> {
        let bytes = presets
            .render()
            .with_context(|| format!("Failed to encode presets file: {}", self.presets_path))?;

        fs::write(&self.presets_path, bytes)
            .with_context(|| format!("Failed to write presets file: {}", self.presets_path))?;

        tracing::info!("Saved presets file to {}", self.presets_path);
        Ok(())
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn project_path(&self) -> &Utf8Path {
        &self.project_path
    }

    pub fn presets_path(&self) -> &Utf8Path {
        &self.presets_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_project(project: &str) -> (ProjectFiles, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let project_path = root.join("project.godot");
        fs::write(&project_path, project).unwrap();

        let files = ProjectFiles::new(&project_path, &ToolSettings::default()).unwrap();
        (files, temp_dir)
    }

    #[test]
    fn test_paths_share_the_project_directory() {
        let (files, _temp_dir) = create_test_project("config_version=5\n");
        assert_eq!(files.presets_path().parent(), Some(files.root()));
        assert_eq!(files.presets_path().file_name(), Some("export_presets.cfg"));
    }

    #[test]
    fn test_missing_presets_file_is_none() {
        let (files, _temp_dir) = create_test_project("config_version=5\n");
        assert!(files.load_presets().unwrap().is_none());
    }

    #[test]
    fn test_invalid_project_names_the_file() {
        let (files, _temp_dir) = create_test_project("[broken\n");
        let err = files.load_project().unwrap_err();
        assert!(format!("{:#}", err).contains("project.godot"));
    }
}
