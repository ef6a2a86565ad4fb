//! Export preset collection (`export_presets.cfg`)
//!
//! Presets live in numbered section groups: `preset.0` holds the preset itself
//! and `preset.0.options` its platform options. Groups are read from index 0
//! upwards and reading stops at the first index with no `preset.{i}` section.

use serde::{Deserialize, Serialize};

use crate::format::{self, Document, FormatError, Table};

/// One export target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub name: String,
    pub platform: String,
    pub runnable: bool,
    pub dedicated_server: bool,
    #[serde(with = "comma_separated")]
    pub custom_features: Vec<String>,
    pub export_filter: String,
    pub include_filter: String,
    pub exclude_filter: String,
    pub export_path: String,
    pub encryption_include_filters: String,
    pub encryption_exclude_filters: String,
    pub encrypt_pck: bool,
    pub encrypt_directory: bool,
    pub script_export_mode: Option<i64>,

    #[serde(skip)]
    pub options: PresetOptions,

    #[serde(skip)]
    extra: Table,
}

impl Preset {
    pub fn new(name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            ..Default::default()
        }
    }

    /// Keys of the preset section this record has no field for
    pub fn extra(&self) -> &Table {
        &self.extra
    }
}

/// Platform options of a preset (`preset.{i}.options`)
///
/// Every field is optional: each platform only writes the options it knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetOptions {
    #[serde(rename = "custom_template/debug")]
    pub custom_template_debug: Option<String>,
    #[serde(rename = "custom_template/release")]
    pub custom_template_release: Option<String>,
    #[serde(rename = "debug/export_console_wrapper")]
    pub export_console_wrapper: Option<i64>,

    #[serde(rename = "binary_format/architecture")]
    pub architecture: Option<String>,
    #[serde(rename = "binary_format/embed_pck")]
    pub embed_pck: Option<bool>,

    #[serde(rename = "texture_format/bptc")]
    pub texture_bptc: Option<bool>,
    #[serde(rename = "texture_format/s3tc")]
    pub texture_s3tc: Option<bool>,
    #[serde(rename = "texture_format/etc")]
    pub texture_etc: Option<bool>,
    #[serde(rename = "texture_format/etc2")]
    pub texture_etc2: Option<bool>,

    #[serde(rename = "codesign/enable")]
    pub codesign_enable: Option<bool>,
    #[serde(rename = "codesign/timestamp")]
    pub codesign_timestamp: Option<bool>,
    #[serde(rename = "codesign/timestamp_server_url")]
    pub codesign_timestamp_server_url: Option<String>,
    #[serde(rename = "codesign/digest_algorithm")]
    pub codesign_digest_algorithm: Option<i64>,
    #[serde(rename = "codesign/description")]
    pub codesign_description: Option<String>,
    #[serde(rename = "codesign/custom_options")]
    pub codesign_custom_options: Option<Vec<String>>,

    #[serde(rename = "application/modify_resources")]
    pub modify_resources: Option<bool>,
    #[serde(rename = "application/icon")]
    pub icon: Option<String>,
    #[serde(rename = "application/console_wrapper_icon")]
    pub console_wrapper_icon: Option<String>,
    #[serde(rename = "application/icon_interpolation")]
    pub icon_interpolation: Option<i64>,
    #[serde(rename = "application/file_version")]
    pub file_version: Option<String>,
    #[serde(rename = "application/product_version")]
    pub product_version: Option<String>,
    #[serde(rename = "application/company_name")]
    pub company_name: Option<String>,
    #[serde(rename = "application/product_name")]
    pub product_name: Option<String>,
    #[serde(rename = "application/file_description")]
    pub file_description: Option<String>,
    #[serde(rename = "application/copyright")]
    pub copyright: Option<String>,
    #[serde(rename = "application/trademarks")]
    pub trademarks: Option<String>,
    #[serde(rename = "application/export_angle")]
    pub export_angle: Option<i64>,

    #[serde(rename = "ssh_remote_deploy/enabled")]
    pub ssh_enabled: Option<bool>,
    #[serde(rename = "ssh_remote_deploy/host")]
    pub ssh_host: Option<String>,
    #[serde(rename = "ssh_remote_deploy/port")]
    pub ssh_port: Option<String>,
    #[serde(rename = "ssh_remote_deploy/extra_args_ssh")]
    pub ssh_extra_args: Option<String>,
    #[serde(rename = "ssh_remote_deploy/extra_args_scp")]
    pub scp_extra_args: Option<String>,
    #[serde(rename = "ssh_remote_deploy/run_script")]
    pub ssh_run_script: Option<String>,
    #[serde(rename = "ssh_remote_deploy/cleanup_script")]
    pub ssh_cleanup_script: Option<String>,

    #[serde(rename = "dotnet/include_scripts_content")]
    pub dotnet_include_scripts_content: Option<bool>,
    #[serde(rename = "dotnet/include_debug_symbols")]
    pub dotnet_include_debug_symbols: Option<bool>,
    #[serde(rename = "dotnet/embed_build_outputs")]
    pub dotnet_embed_build_outputs: Option<bool>,

    #[serde(skip)]
    extra: Table,
}

impl PresetOptions {
    /// Option keys this record has no field for
    pub fn extra(&self) -> &Table {
        &self.extra
    }
}

/// The ordered presets of an `export_presets.cfg` file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportPresets {
    presets: Vec<Preset>,
}

impl ExportPresets {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Decode a presets file's contents
    pub fn from_bytes(input: &[u8]) -> Result<Self, FormatError> {
        let document = Document::parse(input)?;
        Self::from_document(&document)
    }

    /// Collect the preset groups of a decoded document.
    ///
    /// A group whose preset or options section fails to bind is skipped with
    /// a warning. Having no preset left at all is an error.
    pub fn from_document(document: &Document) -> Result<Self, FormatError> {
        let mut presets = Vec::new();

        for index in 0.. {
            let section = format!("preset.{}", index);
            let Some(table) = document.section(&section) else {
                break;
            };

            let preset = match bind_preset(document, &section, table) {
                Ok(preset) => preset,
                Err(e) => {
                    tracing::warn!("Skipping preset {}: {}", index, e);
                    continue;
                }
            };

            tracing::debug!("Loaded preset {}: {} ({})", index, preset.name, preset.platform);
            presets.push(preset);
        }

        if presets.is_empty() {
            return Err(FormatError::NoPresets);
        }

        tracing::info!("Loaded {} export presets", presets.len());
        Ok(Self { presets })
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn presets_mut(&mut self) -> &mut Vec<Preset> {
        &mut self.presets
    }

    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    /// Find a preset by its exact name
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Preset> {
        self.presets.iter()
    }

    /// Lay the presets out as `preset.{i}` / `preset.{i}.options` sections
    pub fn to_document(&self) -> Result<Document, FormatError> {
        let mut document = Document::new();

        for (index, preset) in self.presets.iter().enumerate() {
            let section = format!("preset.{}", index);
            let options_section = format!("{}.options", section);

            let table = overlay(&preset.extra, format::to_table(&section, preset)?);
            let options = overlay(
                &preset.options.extra,
                format::to_table(&options_section, &preset.options)?,
            );

            document.insert_section(section, table);
            document.insert_section(options_section, options);
        }

        Ok(document)
    }

    /// Encode the presets back into `export_presets.cfg` form
    pub fn render(&self) -> Result<Vec<u8>, FormatError> {
        self.to_document()?.to_bytes()
    }
}

impl<'a> IntoIterator for &'a ExportPresets {
    type Item = &'a Preset;
    type IntoIter = std::slice::Iter<'a, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.presets.iter()
    }
}

fn bind_preset(document: &Document, section: &str, table: &Table) -> Result<Preset, FormatError> {
    let mut preset: Preset = bind(section, table)?;
    preset.extra = unknown_keys(table, &format::to_table(section, &preset)?);

    let options_section = format!("{}.options", section);
    if let Some(options_table) = document.section(&options_section) {
        let mut options: PresetOptions = bind(&options_section, options_table)?;
        options.extra = unknown_keys(options_table, &format::to_table(&options_section, &options)?);
        preset.options = options;
    }

    Ok(preset)
}

fn bind<T: serde::de::DeserializeOwned>(section: &str, table: &Table) -> Result<T, FormatError> {
    format::from_table(table).map_err(|source| FormatError::Binding {
        target: format!("section [{}]", section),
        source,
    })
}

/// Raw keys that did not come back out of the typed record
fn unknown_keys(raw: &Table, typed: &Table) -> Table {
    raw.iter()
        .filter(|(key, _)| !typed.contains_key(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn overlay(extra: &Table, typed: Table) -> Table {
    let mut table = extra.clone();
    table.extend(typed);
    table
}

/// Feature lists are stored as one comma-separated string
mod comma_separated {
    use serde::de::{self, SeqAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(items: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&items.join(","))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        deserializer.deserialize_any(FeaturesVisitor)
    }

    struct FeaturesVisitor;

    impl<'de> Visitor<'de> for FeaturesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a comma-separated string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut items = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                items.push(item);
            }
            Ok(items)
        }
    }
}
