//! Locating `project.godot`.
//!
//! An explicit path (the project file itself or its directory) is the only
//! place searched when given. Otherwise the current directory is tried first,
//! then each configured search path; fallbacks that do not exist are skipped.

use crate::models::ToolSettings;
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};

/// The places searched for a project file, in order
pub fn search_paths(explicit: Option<&Utf8Path>, settings: &ToolSettings) -> Result<Vec<Utf8PathBuf>> {
    if let Some(path) = explicit {
        return Ok(vec![path.to_path_buf()]);
    }

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let cwd = Utf8PathBuf::try_from(cwd).context("Current directory is not valid UTF-8")?;

    let mut paths = vec![cwd];
    paths.extend(settings.search_paths.iter().cloned());
    Ok(paths)
}

/// Find the project file and return its absolute path
pub fn find_project_file(explicit: Option<&Utf8Path>, settings: &ToolSettings) -> Result<Utf8PathBuf> {
    let candidates = search_paths(explicit, settings)?;
    find_in(&candidates, &settings.project_file, explicit.is_some())
}

/// Search `candidates` in order for `filename`.
///
/// With `strict`, a candidate that does not exist is an error instead of
/// being skipped.
pub fn find_in(candidates: &[Utf8PathBuf], filename: &str, strict: bool) -> Result<Utf8PathBuf> {
    for candidate in candidates {
        if !candidate.exists() {
            if strict {
                bail!("Project path does not exist: {}", candidate);
            }
            tracing::debug!("Skipping missing search path {}", candidate);
            continue;
        }

        if let Some(found) = check_candidate(candidate, filename) {
            let absolute = found
                .canonicalize_utf8()
                .with_context(|| format!("Failed to resolve project path: {}", found))?;
            tracing::info!("Found project file at {}", absolute);
            return Ok(absolute);
        }
    }

    let searched: Vec<&str> = candidates.iter().map(|p| p.as_str()).collect();
    bail!("No {} found in: {}", filename, searched.join(", "))
}

fn check_candidate(path: &Utf8Path, filename: &str) -> Option<Utf8PathBuf> {
    if path.is_dir() {
        let project_path = path.join(filename);
        tracing::debug!("Checking directory for project file: {}", project_path);
        return project_path.is_file().then_some(project_path);
    }

    tracing::debug!("Checking if the path is the project file: {}", path);
    (path.file_name() == Some(filename)).then(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_path(temp_dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_directory_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_path(&temp_dir);
        fs::write(root.join("project.godot"), "config_version=5\n").unwrap();

        let found = find_in(&[root], "project.godot", true).unwrap();
        assert_eq!(found.file_name(), Some("project.godot"));
        assert!(found.is_absolute());
    }

    #[test]
    fn test_file_candidate_must_match_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_path(&temp_dir);
        let other = root.join("other.cfg");
        fs::write(&other, "").unwrap();

        assert!(find_in(&[other], "project.godot", true).is_err());
    }

    #[test]
    fn test_missing_fallbacks_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_path(&temp_dir);
        fs::write(root.join("project.godot"), "").unwrap();

        let candidates = vec![root.join("missing"), root.clone()];
        assert!(find_in(&candidates, "project.godot", false).is_ok());
        assert!(find_in(&candidates, "project.godot", true).is_err());
    }

    #[test]
    fn test_explicit_path_is_the_only_candidate() {
        let settings = ToolSettings::default();
        let paths = search_paths(Some(Utf8Path::new("/some/project")), &settings).unwrap();
        assert_eq!(paths, vec![Utf8PathBuf::from("/some/project")]);
    }

    #[test]
    fn test_current_directory_is_searched_first() {
        let settings = ToolSettings::default();
        let paths = search_paths(None, &settings).unwrap();
        assert_eq!(paths.len(), settings.search_paths.len() + 1);
        assert_eq!(&paths[1..], settings.search_paths.as_slice());
    }
}
