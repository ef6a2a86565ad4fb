//! Integration tests for project settings
//!
//! These tests verify:
//! - Flat-path binding of the project descriptor
//! - Engine version and .NET detection
//! - Rendering edits without losing unknown settings

use godotcfg::format::{Document, FormatError, Value};
use godotcfg::ProjectConfig;

const PROJECT_GODOT: &str = r#"; Engine configuration file.
; It's best edited using the editor UI and not directly,
; since the parameters that go here are not all obvious.

config_version=5

[application]

config/name="Space Shooter"
config/description="Shoot things
in space"
config/version="1.2.0"
run/main_scene="res://scenes/main.tscn"
config/features=PackedStringArray("4.2", "GL Compatibility")
config/icon="res://icon.svg"

[autoload]

Events="*res://autoload/events.gd"

[rendering]

renderer/rendering_method="gl_compatibility"
textures/vram_compression/import_etc2_astc=true
"#;

#[test]
fn test_project_fields() {
    let project = ProjectConfig::from_bytes(PROJECT_GODOT.as_bytes()).unwrap();

    assert_eq!(project.config_version, 5);
    assert_eq!(project.project_name(), "Space Shooter");
    assert_eq!(project.main_scene, "res://scenes/main.tscn");
    assert_eq!(project.version.as_deref(), Some("1.2.0"));
    assert_eq!(project.icon.as_deref(), Some("res://icon.svg"));
    assert_eq!(
        project.description.as_deref(),
        Some("Shoot things__NEWLINE__in space")
    );
}

#[test]
fn test_engine_version_from_features() {
    let project = ProjectConfig::from_bytes(PROJECT_GODOT.as_bytes()).unwrap();
    let version = project.engine_version().unwrap();
    assert_eq!(version.original(), "4.2");
    assert!(!project.contains_mono());
}

#[test]
fn test_single_feature_is_a_list() {
    let input = "[application]\nconfig/features=PackedStringArray(\"4.3\")\n";
    let project = ProjectConfig::from_bytes(input.as_bytes()).unwrap();
    assert_eq!(project.features, vec!["4.3"]);
}

#[test]
fn test_csharp_feature_means_mono() {
    let input = "[application]\nconfig/features=PackedStringArray(\"4.3\", \"C#\", \"Forward Plus\")\n";
    let project = ProjectConfig::from_bytes(input.as_bytes()).unwrap();
    assert!(project.contains_mono());
}

#[test]
fn test_raw_document_keeps_everything() {
    let project = ProjectConfig::from_bytes(PROJECT_GODOT.as_bytes()).unwrap();
    assert_eq!(
        project.raw().get("autoload", "Events"),
        Some(&Value::from("*res://autoload/events.gd"))
    );
    assert_eq!(
        project.raw().get_path("rendering.renderer/rendering_method"),
        Some(&Value::from("gl_compatibility"))
    );
}

#[test]
fn test_binding_failure_is_hard() {
    let err = ProjectConfig::from_bytes(b"config_version=v5\n").unwrap_err();
    match err {
        FormatError::Binding { source, .. } => {
            assert!(source.to_string().starts_with("DEFAULT.config_version"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_render_applies_edits_and_keeps_other_settings() {
    let mut project = ProjectConfig::from_bytes(PROJECT_GODOT.as_bytes()).unwrap();
    project.name = "Space Shooter DX".to_string();
    project.features.push("Mobile".to_string());

    let rendered = project.render().unwrap();
    let reloaded = ProjectConfig::from_bytes(&rendered).unwrap();

    assert_eq!(reloaded.project_name(), "Space Shooter DX");
    assert_eq!(reloaded.features, vec!["4.2", "GL Compatibility", "Mobile"]);
    assert_eq!(reloaded.description, project.description);
    assert_eq!(
        reloaded.raw().get("rendering", "textures/vram_compression/import_etc2_astc"),
        Some(&Value::from("true"))
    );
}

#[test]
fn test_render_of_unchanged_project_is_stable() {
    let project = ProjectConfig::from_bytes(PROJECT_GODOT.as_bytes()).unwrap();
    let first = project.render().unwrap();
    let second = ProjectConfig::from_bytes(&first).unwrap().render().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_from_document() {
    let mut document = Document::new();
    document.set("application", "config/name", "Built");
    document.set("DEFAULT", "config_version", 5i64);

    let project = ProjectConfig::from_document(document).unwrap();
    assert_eq!(project.project_name(), "Built");
    assert_eq!(project.config_version, 5);
    assert!(project.engine_version().is_none());
}
