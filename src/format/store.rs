//! Section/key store read from canonical lines
//!
//! Every occurrence of a key is recorded, in order. Nothing here deduplicates
//! or overwrites; a key written with the array constructor is tagged as an
//! array instead of carrying an in-band marker value.

use indexmap::IndexMap;

use super::error::FormatError;
use super::sanitize::Line;

/// Name of the section that holds keys written before any header
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Values recorded for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Plain `key = value` occurrences, in order
    Values(Vec<String>),
    /// An explicit array, possibly empty
    Array(Vec<String>),
}

impl Entry {
    pub fn values(&self) -> &[String] {
        match self {
            Entry::Values(values) | Entry::Array(values) => values,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Entry::Array(_))
    }

    fn push(&mut self, value: String) {
        match self {
            Entry::Values(values) | Entry::Array(values) => values.push(value),
        }
    }

    // A key seen once as an array stays an array; earlier values are kept
    fn extend_array(&mut self, elements: Vec<String>) {
        match self {
            Entry::Array(values) => values.extend(elements),
            Entry::Values(values) => {
                let mut values = std::mem::take(values);
                values.extend(elements);
                *self = Entry::Array(values);
            }
        }
    }
}

/// One named section: keys in first-seen order, each with all recorded values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: IndexMap<String, Entry>,
}

impl Section {
    /// Check whether the key was recorded at least once
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// All values recorded for a key, in order of occurrence
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Entry::values)
    }

    /// The first value recorded for a key
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn is_array(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(Entry::is_array)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn record(&mut self, key: &str, value: String) {
        match self.entries.get_mut(key) {
            Some(entry) => entry.push(value),
            None => {
                self.entries.insert(key.to_string(), Entry::Values(vec![value]));
            }
        }
    }

    fn record_array(&mut self, key: &str, elements: Vec<String>) {
        self.entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Array(Vec::new()))
            .extend_array(elements);
    }
}

/// Ordered collection of sections parsed from canonical lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    sections: IndexMap<String, Section>,
}

impl Default for Store {
    fn default() -> Self {
        let mut sections = IndexMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), Section::default());
        Self { sections }
    }
}

impl Store {
    /// Parse plain `[section]` / `key = value` text.
    ///
    /// Blank lines and `;`/`#` comment lines are skipped. A header without its
    /// closing bracket, or a line without `=`, is rejected with its line number.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let lines: Vec<Line> = text.lines().map(|line| Line::Text(line.to_string())).collect();
        Self::from_lines(&lines)
    }

    /// Build a store from sanitized lines; line numbers count canonical lines
    pub fn from_lines(lines: &[Line]) -> Result<Self, FormatError> {
        let mut store = Store::default();
        let mut current = DEFAULT_SECTION.to_string();

        for (index, canonical) in lines.iter().enumerate() {
            let line_number = index + 1;

            let line = match canonical {
                Line::Text(text) => text.trim(),
                Line::Array { key, elements } => {
                    if key.is_empty() {
                        return Err(FormatError::MissingDelimiter {
                            line: line_number,
                            content: canonical.to_string(),
                        });
                    }
                    let elements = elements.iter().map(|e| unquote(e).to_string()).collect();
                    store
                        .sections
                        .entry(current.clone())
                        .or_default()
                        .record_array(key, elements);
                    continue;
                }
            };

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| FormatError::MalformedSection {
                        line: line_number,
                        header: line.to_string(),
                    })?;

                current = name.to_string();
                store.sections.entry(current.clone()).or_default();
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .map(|(key, value)| (key.trim(), value.trim()))
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| FormatError::MissingDelimiter {
                    line: line_number,
                    content: line.to_string(),
                })?;

            store
                .sections
                .entry(current.clone())
                .or_default()
                .record(key, unquote(value).to_string());
        }

        Ok(store)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Sections in first-seen order, starting with the default section
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .map(|(name, section)| (name.as_str(), section))
    }
}

/// Strip one pair of surrounding double quotes
fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
