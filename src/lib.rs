// godotcfg - Reader and writer for Godot project configuration files
//
// This is the library crate containing the format engine and the typed project
// and preset records. The binary crate (main.rs) prints a project summary.

pub mod config;
pub mod format;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::SettingsManager;
pub use format::{Document, FormatError, Value};
pub use models::{EngineVersion, ExportPresets, Preset, PresetOptions, ProjectConfig, ToolSettings};
pub use services::{BuildTarget, ProjectFiles};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
