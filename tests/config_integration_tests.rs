//! Integration tests for SettingsManager and settings file handling
//!
//! These tests verify:
//! - Settings loading and saving
//! - Default settings when no file exists
//! - Partial settings files falling back to defaults
//! - Settings driving project file names

use camino::Utf8PathBuf;
use godotcfg::{ProjectFiles, SettingsManager, ToolSettings};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_settings_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = SettingsManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(manager.settings_path(), config_path.join("godotcfg.yaml").as_path());
}

#[test]
fn test_load_default_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = SettingsManager::new(&config_path).unwrap();

    // Settings file doesn't exist, should return defaults
    let settings = manager.load_settings().unwrap();

    assert_eq!(settings, ToolSettings::default());
}

#[test]
fn test_save_and_load_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = SettingsManager::new(&config_path).unwrap();

    let mut settings = manager.load_settings().unwrap();
    settings.debug_mode = true;
    settings.default_engine_version = "4.4".to_string();
    settings.log_dir = Utf8PathBuf::from("/var/log/godotcfg");

    manager.save_settings(&settings).unwrap();

    let loaded = manager.load_settings().unwrap();
    assert!(loaded.debug_mode);
    assert_eq!(loaded.default_engine_version, "4.4");
    assert_eq!(loaded.log_dir, "/var/log/godotcfg");
}

#[test]
fn test_partial_settings_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = SettingsManager::new(&config_path).unwrap();

    let content = r#"
default_engine_version: "4.2.2"
search_paths:
  - /srv/game
"#;
    fs::write(manager.settings_path(), content).unwrap();

    let settings = manager.load_settings().unwrap();
    assert_eq!(settings.default_engine_version, "4.2.2");
    assert_eq!(settings.search_paths, vec![Utf8PathBuf::from("/srv/game")]);
    assert_eq!(settings.project_file, "project.godot");
    assert!(!settings.debug_mode);
}

#[test]
fn test_invalid_settings_file_names_the_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = SettingsManager::new(&config_path).unwrap();

    fs::write(manager.settings_path(), "debug_mode: [not, a, bool]\n").unwrap();

    let err = manager.load_settings().unwrap_err();
    assert!(err.to_string().contains("godotcfg.yaml"));
}

#[test]
fn test_custom_presets_file_name() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let project_path = config_path.join("project.godot");
    fs::write(&project_path, "config_version=5\n").unwrap();
    fs::write(
        config_path.join("presets.cfg"),
        "[preset.0]\nname=\"Linux\"\nplatform=\"Linux\"\n",
    )
    .unwrap();

    let settings = ToolSettings {
        presets_file: "presets.cfg".to_string(),
        ..Default::default()
    };
    let files = ProjectFiles::new(&project_path, &settings).unwrap();

    let presets = files.load_presets().unwrap().unwrap();
    assert_eq!(presets.preset_names(), vec!["Linux"]);
}
