use crate::models::{ProjectConfig, ToolSettings};
use std::fmt;

/// Where the resolved engine version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    Requested,
    Project,
    Default,
}

/// Engine build a project should be exported with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub version: String,
    pub version_source: VersionSource,
    pub mono: bool,
}

impl BuildTarget {
    /// Pick the engine version and flavour.
    ///
    /// The version is the requested one, else the highest version among the
    /// project's feature tags, else the configured default. Mono is the
    /// requested flag, else whether the project uses .NET.
    pub fn resolve(
        requested_version: Option<&str>,
        requested_mono: Option<bool>,
        project: &ProjectConfig,
        settings: &ToolSettings,
    ) -> Self {
        let (version, version_source) = match requested_version.filter(|v| !v.trim().is_empty()) {
            Some(version) => (version.trim().to_string(), VersionSource::Requested),
            None => match project.engine_version() {
                Some(version) => (version.original().to_string(), VersionSource::Project),
                None => (settings.default_engine_version.clone(), VersionSource::Default),
            },
        };
        tracing::debug!("Using engine version {} ({:?})", version, version_source);

        let mono = requested_mono.unwrap_or_else(|| project.contains_mono());

        Self {
            version,
            version_source,
            mono,
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mono {
            write!(f, "{} (mono)", self.version)
        } else {
            f.write_str(&self.version)
        }
    }
}
