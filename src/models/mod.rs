//! Typed records built on the format engine.
//!
//! - [`ProjectConfig`]: project settings from `project.godot`
//! - [`ExportPresets`]: the ordered [`Preset`] collection from `export_presets.cfg`
//! - [`EngineVersion`]: an engine version read from a project feature tag
//! - [`ToolSettings`]: settings of this tool, persisted as YAML

pub mod preset;
pub mod project;
pub mod settings;
pub mod version;

pub use preset::{ExportPresets, Preset, PresetOptions};
pub use project::ProjectConfig;
pub use settings::ToolSettings;
pub use version::EngineVersion;
