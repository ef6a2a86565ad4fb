use serde::{Deserialize, Serialize};

use crate::format::{self, Document, FormatError};
use crate::models::EngineVersion;

/// Project settings from `project.godot`
///
/// Fields are bound by flat `section.key` paths. The complete decoded document
/// is kept alongside so callers can inspect settings this record has no field
/// for, and so rendering does not lose them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    #[serde(rename = "DEFAULT.config_version")]
    pub config_version: i64,

    #[serde(rename = "application.config/name")]
    pub name: String,

    #[serde(rename = "application.config/features")]
    pub features: Vec<String>,

    #[serde(rename = "application.run/main_scene")]
    pub main_scene: String,

    #[serde(rename = "application.config/description")]
    pub description: Option<String>,

    #[serde(rename = "application.config/version")]
    pub version: Option<String>,

    #[serde(rename = "application.config/icon")]
    pub icon: Option<String>,

    #[serde(skip)]
    raw: Document,
}

impl ProjectConfig {
    /// Decode a project file's contents
    pub fn from_bytes(input: &[u8]) -> Result<Self, FormatError> {
        let document = Document::parse(input)?;
        Self::from_document(document)
    }

    /// Bind the typed fields of an already decoded document
    pub fn from_document(document: Document) -> Result<Self, FormatError> {
        let mut config: ProjectConfig =
            format::from_entries(document.paths()).map_err(|source| FormatError::Binding {
                target: "project settings".to_string(),
                source,
            })?;

        config.raw = document;
        Ok(config)
    }

    /// The complete decoded document
    pub fn raw(&self) -> &Document {
        &self.raw
    }

    pub fn project_name(&self) -> &str {
        &self.name
    }

    /// Whether the project is set up for the .NET (Mono) build of the engine
    pub fn contains_mono(&self) -> bool {
        self.raw.paths().any(|(path, _)| path.starts_with("dotnet"))
            || self.features.iter().any(|feature| feature == "C#")
    }

    /// The highest engine version listed among the feature tags
    pub fn engine_version(&self) -> Option<EngineVersion> {
        EngineVersion::highest(&self.features)
    }

    /// Project the typed fields back onto the decoded document.
    ///
    /// Typed values replace their raw counterparts. A blank typed value is not
    /// added where the original document had no such key.
    pub fn to_document(&self) -> Result<Document, FormatError> {
        let mut document = self.raw.clone();

        for (path, value) in format::to_table("project", self)? {
            let Some((section, key)) = path.split_once('.') else {
                continue;
            };
            if value.is_blank() && document.get(section, key).is_none() {
                continue;
            }
            document.set(section, key, value);
        }

        Ok(document)
    }

    /// Encode the project back into `project.godot` form
    pub fn render(&self) -> Result<Vec<u8>, FormatError> {
        self.to_document()?.to_bytes()
    }
}
