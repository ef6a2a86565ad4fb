//! Error types for the configuration format engine

use std::fmt;
use thiserror::Error;

/// Multi-line construct that was still open when the input ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A quoted string spanning several physical lines
    String,
    /// A brace-delimited inline structure spanning several physical lines
    Blob,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanKind::String => f.write_str("multi-line string"),
            SpanKind::Blob => f.write_str("inline structure"),
        }
    }
}

/// Errors raised while decoding or encoding configuration documents
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Malformed section header at line {line}: {header}")]
    MalformedSection { line: usize, header: String },

    #[error("Expected 'key=value' at line {line}: {content}")]
    MissingDelimiter { line: usize, content: String },

    #[error("Unterminated {kind} starting at line {line}")]
    Unterminated { line: usize, kind: SpanKind },

    #[error("Failed to bind {target}: {source}")]
    Binding {
        target: String,
        #[source]
        source: BindError,
    },

    #[error("No valid presets found")]
    NoPresets,

    #[error("Cannot encode '{path}': {reason}")]
    Unsupported { path: String, reason: String },
}

impl FormatError {
    pub(crate) fn unsupported(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FormatError::Unsupported {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A typed-binding failure, usually naming the key that could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError(String);

impl BindError {
    /// Qualify the error with the key it occurred under
    pub(crate) fn at(self, key: &str) -> Self {
        BindError(format!("{}: {}", key, self.0))
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for BindError {}

impl serde::de::Error for BindError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        BindError(msg.to_string())
    }
}
