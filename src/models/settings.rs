use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Settings of the tool itself, loaded from `godotcfg.yaml`
///
/// Every field has a default, so a partial settings file (or none at all) is
/// valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub debug_mode: bool,
    pub log_dir: Utf8PathBuf,

    /// Engine version used when neither the caller nor the project names one
    pub default_engine_version: String,

    /// Directories searched for a project when none is given
    pub search_paths: Vec<Utf8PathBuf>,

    pub project_file: String,
    pub presets_file: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            log_dir: Utf8PathBuf::from("logs"),
            default_engine_version: "4.3".to_string(),
            search_paths: ["/app", "/workspaces", "/src", "/code"]
                .into_iter()
                .map(Utf8PathBuf::from)
                .collect(),
            project_file: "project.godot".to_string(),
            presets_file: "export_presets.cfg".to_string(),
        }
    }
}
