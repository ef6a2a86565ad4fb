//! godotcfg - inspect a Godot project's configuration
//!
//! Usage: `godotcfg [OPTIONS] [PROJECT_PATH]`
//!
//! # Execution Flow
//!
//! 1. Load tool settings from `.godotcfg/godotcfg.yaml` and `GODOTCFG_*` variables
//! 2. Initialize logging → <log_dir>/godotcfg.<date>
//! 3. Locate `project.godot` (the given path, else the current directory and
//!    the configured search paths)
//! 4. Load the project and its export presets
//! 5. Print a summary: name, config version, main scene, engine target, presets

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use godotcfg::{APP_NAME, BuildTarget, ProjectFiles, SettingsManager, VERSION};

/// Directory holding the tool's own settings file
const SETTINGS_DIR: &str = ".godotcfg";

#[derive(Debug, Parser)]
#[command(
    name = "godotcfg",
    version = VERSION,
    about = "Inspect a Godot project's configuration and export presets"
)]
struct Cli {
    /// Project directory or path to project.godot (defaults to a search)
    #[arg(value_name = "PROJECT_PATH")]
    project_path: Option<Utf8PathBuf>,

    /// Engine version to target instead of the project's feature tags
    #[arg(long = "engine-version", value_name = "VERSION")]
    engine_version: Option<String>,

    /// Force the .NET (mono) build on or off
    #[arg(long, value_name = "BOOL")]
    mono: Option<bool>,

    /// Enable debug logging regardless of settings
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_manager = SettingsManager::new(SETTINGS_DIR)?;
    let settings = settings_manager.load_settings()?;

    let _guard = godotcfg::logging::setup_logging(
        &settings.log_dir,
        APP_NAME,
        cli.debug || settings.debug_mode,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let files = ProjectFiles::discover(cli.project_path.as_deref(), &settings)?;
    let project = files.load_project()?;
    let presets = files.load_presets()?;
    let target = BuildTarget::resolve(cli.engine_version.as_deref(), cli.mono, &project, &settings);

    println!("Project:        {}", project.project_name());
    println!("Location:       {}", files.project_path());
    println!("Config version: {}", project.config_version);
    println!("Main scene:     {}", project.main_scene);
    println!("Engine:         {}", target);

    match presets {
        Some(presets) => {
            println!("Presets:");
            for preset in &presets {
                println!("  - {} ({})", preset.name, preset.platform);
            }
        }
        None => println!("Presets:        none"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_searches() {
        let cli = Cli::try_parse_from(["godotcfg"]).unwrap();
        assert!(cli.project_path.is_none());
        assert!(cli.engine_version.is_none());
        assert!(cli.mono.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_project_path_and_overrides() {
        let cli = Cli::try_parse_from([
            "godotcfg",
            "games/platformer",
            "--engine-version",
            "4.2.2",
            "--mono",
            "false",
        ])
        .unwrap();
        assert_eq!(cli.project_path, Some(Utf8PathBuf::from("games/platformer")));
        assert_eq!(cli.engine_version.as_deref(), Some("4.2.2"));
        assert_eq!(cli.mono, Some(false));
    }

    #[test]
    fn test_version_flag_is_handled_by_clap() {
        let err = Cli::try_parse_from(["godotcfg", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
