//! Generic section/key/value document

use indexmap::IndexMap;
use std::fmt;

use super::error::FormatError;
use super::sanitize::{sanitize, NEWLINE_SENTINEL};
use super::store::{Entry, Store, DEFAULT_SECTION};

/// A single configuration value
///
/// Decoding only produces [`Value::String`] and [`Value::Array`]; the other
/// variants come from typed records being projected back into a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// The value a freshly defaulted field would hold
    pub(crate) fn is_blank(&self) -> bool {
        match self {
            Value::String(s) => s.is_empty(),
            Value::Integer(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Boolean(b) => !b,
            Value::Array(items) => items.is_empty(),
        }
    }

    /// Resolve the values recorded for one key into a scalar or an array
    fn resolve(entry: &Entry) -> Value {
        match entry {
            Entry::Array(items) => Value::Array(items.clone()),
            Entry::Values(values) => match values.as_slice() {
                [single] => Value::String(single.clone()),
                // Plain repeated keys are kept as an array rather than dropped
                many => Value::Array(many.to_vec()),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(&s.replace(NEWLINE_SENTINEL, "\n")),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Array(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::Array(value)
    }
}

/// Keys of one section mapped to their values
pub type Table = IndexMap<String, Value>;

/// A decoded configuration file: sections in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    sections: IndexMap<String, Table>,
}

impl Default for Document {
    fn default() -> Self {
        let mut sections = IndexMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), Table::new());
        Self { sections }
    }
}

impl Document {
    /// Create a document holding only the empty default section
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode raw configuration bytes.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn parse(input: &[u8]) -> Result<Self, FormatError> {
        let text = String::from_utf8_lossy(input);
        let canonical = sanitize(&text)?;
        let store = Store::from_lines(&canonical)?;
        Ok(Self::from_store(&store))
    }

    /// Resolve every key of a store into a scalar or an array
    pub fn from_store(store: &Store) -> Self {
        let mut document = Document::default();

        for (name, section) in store.sections() {
            let table: Table = section
                .iter()
                .map(|(key, entry)| (key.to_string(), Value::resolve(entry)))
                .collect();
            document.sections.insert(name.to_string(), table);
        }

        tracing::debug!("Decoded document with {} sections", document.sections.len());
        document
    }

    /// Encode back into the configuration dialect
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        super::encode::encode(self)
    }

    pub fn section(&self, name: &str) -> Option<&Table> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.sections.get_mut(name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Insert or replace a whole section
    pub fn insert_section(&mut self, name: impl Into<String>, table: Table) {
        self.sections.insert(name.into(), table);
    }

    /// Set one value, creating the section if needed
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<Value>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section).and_then(|table| table.get(key))
    }

    /// Look up a flat `section.key` path.
    ///
    /// Section names may themselves contain dots, and keys may carry `.feature`
    /// suffixes, so each split point is tried from the left until one names an
    /// existing section that holds the rest as a key.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.match_indices('.')
            .find_map(|(index, _)| self.get(&path[..index], &path[index + 1..]))
    }

    /// Every value with its flat `section.key` path, in document order
    pub fn paths(&self) -> impl Iterator<Item = (String, &Value)> {
        self.sections.iter().flat_map(|(name, table)| {
            table
                .iter()
                .map(move |(key, value)| (format!("{}.{}", name, key), value))
        })
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.sections
            .iter()
            .map(|(name, table)| (name.as_str(), table))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_empty_array() {
        assert_eq!(
            Value::resolve(&Entry::Array(Vec::new())),
            Value::Array(Vec::new())
        );
    }

    #[test]
    fn test_resolve_one_element_array_stays_array() {
        assert_eq!(
            Value::resolve(&Entry::Array(strings(&["foo"]))),
            Value::Array(strings(&["foo"]))
        );
    }

    #[test]
    fn test_resolve_single_value_is_scalar() {
        assert_eq!(
            Value::resolve(&Entry::Values(strings(&["foo"]))),
            Value::String("foo".to_string())
        );
    }

    #[test]
    fn test_resolve_repeats_keep_all_values() {
        assert_eq!(
            Value::resolve(&Entry::Values(strings(&["foo", "42", "true"]))),
            Value::Array(strings(&["foo", "42", "true"]))
        );
    }

    #[test]
    fn test_sentinel_like_text_stays_scalar() {
        let doc = Document::parse(b"k=__ARRAY_SENTINEL__\n").unwrap();
        assert_eq!(
            doc.get(DEFAULT_SECTION, "k"),
            Some(&Value::from("__ARRAY_SENTINEL__"))
        );
    }

    #[test]
    fn test_get_path_handles_dotted_sections_and_keys() {
        let mut doc = Document::new();
        doc.set("preset.0.options", "binary_format/architecture", "x86_64");
        doc.set("rendering", "renderer/rendering_method.mobile", "gl_compatibility");

        assert_eq!(
            doc.get_path("preset.0.options.binary_format/architecture"),
            Some(&Value::from("x86_64"))
        );
        assert_eq!(
            doc.get_path("rendering.renderer/rendering_method.mobile"),
            Some(&Value::from("gl_compatibility"))
        );
        assert_eq!(doc.get_path("missing.key"), None);
        assert_eq!(doc.get_path("nodots"), None);
    }

    #[test]
    fn test_paths_are_flat() {
        let mut doc = Document::new();
        doc.set("DEFAULT", "config_version", "5");
        doc.set("application", "config/name", "Demo");

        let paths: Vec<String> = doc.paths().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["DEFAULT.config_version", "application.config/name"]);
    }

    #[test]
    fn test_display_expands_newline_sentinel() {
        let value = Value::from("a__NEWLINE__b");
        assert_eq!(value.to_string(), "a\nb");
    }
}
