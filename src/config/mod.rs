use crate::models::ToolSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Prefix of environment variables overriding settings, e.g. `GODOTCFG_DEBUG_MODE`
pub const ENV_PREFIX: &str = "GODOTCFG";

/// Settings manager for loading and saving `godotcfg.yaml`.
///
/// Values are layered: defaults, then the settings file if present, then
/// `GODOTCFG_*` environment variables.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl SettingsManager {
    /// Create a new SettingsManager, creating the directory if needed.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding `godotcfg.yaml`
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join("godotcfg.yaml"),
            config_dir,
        })
    }

    /// Load the tool settings.
    ///
    /// # Returns
    /// The layered settings, or defaults if neither file nor environment set anything
    pub fn load_settings(&self) -> Result<ToolSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings: ToolSettings = config::Config::builder()
            .add_source(
                config::File::new(self.settings_path.as_str(), config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("search_paths"),
            )
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the tool settings.
    ///
    /// # Arguments
    /// * `settings` - The ToolSettings to save
    pub fn save_settings(&self, settings: &ToolSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_settings_manager() -> (SettingsManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = SettingsManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_settings_manager();
        let settings = manager.load_settings().unwrap();
        assert_eq!(settings.default_engine_version, "4.3");
    }

    #[test]
    fn test_load_save_settings() {
        let (manager, _temp_dir) = create_test_settings_manager();

        let settings = ToolSettings {
            default_engine_version: "4.2.2".to_string(),
            search_paths: vec![Utf8PathBuf::from("/projects")],
            ..Default::default()
        };
        manager.save_settings(&settings).unwrap();

        let loaded = manager.load_settings().unwrap();
        assert_eq!(loaded.default_engine_version, "4.2.2");
        assert_eq!(loaded.search_paths, vec![Utf8PathBuf::from("/projects")]);
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = Utf8PathBuf::try_from(temp_dir.path().join("a").join("b")).unwrap();
        let manager = SettingsManager::new(&nested).unwrap();
        assert!(manager.config_dir().exists());
    }
}
