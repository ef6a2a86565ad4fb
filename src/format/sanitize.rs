//! Line sanitizer
//!
//! Rewrites raw configuration text into canonical lines that a plain
//! section/key reader can consume:
//! - `key=PackedStringArray("a", "b")` becomes a [`Line::Array`] carrying the
//!   key and its elements, so array-ness never travels as an in-band value
//! - a quoted string spanning physical lines is joined into one line, with
//!   [`NEWLINE_SENTINEL`] standing in for each line break
//! - a brace-delimited structure spanning physical lines is joined into one
//!   line with single spaces

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::error::{FormatError, SpanKind};

/// Placeholder for a line break inside a multi-line string value
pub const NEWLINE_SENTINEL: &str = "__NEWLINE__";

/// Name of the array constructor understood by the format
pub const ARRAY_CONSTRUCTOR: &str = "PackedStringArray";

static ARRAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^=]*)=\s*PackedStringArray\((.*)\)\s*$").expect("Invalid array regex")
});

/// One canonical line produced by [`sanitize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A section header or `key=value` line, trimmed
    Text(String),
    /// An array constructor line; elements are trimmed but keep their quotes
    Array { key: String, elements: Vec<String> },
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Text(text) => f.write_str(text),
            Line::Array { key, elements } => {
                write!(f, "{}={}({})", key, ARRAY_CONSTRUCTOR, elements.join(", "))
            }
        }
    }
}

/// Accumulator for a value spread over several physical lines
struct Span {
    kind: SpanKind,
    start_line: usize,
    buffer: String,
}

/// Sanitize raw configuration text into canonical lines.
///
/// Fails when a multi-line string or inline structure is still open at the
/// end of the input.
pub fn sanitize(input: &str) -> Result<Vec<Line>, FormatError> {
    let mut sane = Vec::new();
    let mut span: Option<Span> = None;
    let mut line_count = 0;

    for (index, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        line_count = index + 1;

        if let Some(captures) = ARRAY_PATTERN.captures(line) {
            sane.push(split_array(&captures[1], &captures[2]));
            continue;
        }

        if let Some(mut open) = span.take() {
            match open.kind {
                SpanKind::String => {
                    open.buffer.push_str(line);
                    if closes_string(line) {
                        sane.push(Line::Text(open.buffer));
                    } else {
                        open.buffer.push_str(NEWLINE_SENTINEL);
                        span = Some(open);
                    }
                }
                SpanKind::Blob => {
                    open.buffer.push_str(line);
                    open.buffer.push(' ');
                    if line.contains('}') {
                        sane.push(Line::Text(open.buffer));
                    } else {
                        span = Some(open);
                    }
                }
            }
            continue;
        }

        if opens_string(line) {
            span = Some(Span {
                kind: SpanKind::String,
                start_line: index + 1,
                buffer: format!("{}{}", line, NEWLINE_SENTINEL),
            });
            continue;
        }

        if opens_blob(line) {
            span = Some(Span {
                kind: SpanKind::Blob,
                start_line: index + 1,
                buffer: format!("{} ", line),
            });
            continue;
        }

        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        sane.push(Line::Text(line.to_string()));
    }

    if let Some(open) = span {
        return Err(FormatError::Unterminated {
            line: open.start_line,
            kind: open.kind,
        });
    }

    tracing::debug!(
        "Sanitized {} input lines into {} canonical lines",
        line_count,
        sane.len()
    );
    Ok(sane)
}

fn split_array(key: &str, args: &str) -> Line {
    let elements = if args.trim().is_empty() {
        Vec::new()
    } else {
        args.split(',').map(|element| element.trim().to_string()).collect()
    };

    Line::Array {
        key: key.trim().to_string(),
        elements,
    }
}

/// Whether a trimmed line would be read as an array constructor line
pub(crate) fn is_array_line(line: &str) -> bool {
    ARRAY_PATTERN.is_match(line)
}

fn opens_string(line: &str) -> bool {
    line.contains("=\"") && !line.ends_with('"')
}

// A trailing `\"` is an escaped quote, not a terminator. Deeper escaping
// (`\\"`) is deliberately not distinguished.
pub(crate) fn closes_string(line: &str) -> bool {
    line.ends_with('"') && !line.ends_with("\\\"")
}

/// Whether a line leaves at least one `{` without a matching `}`
pub(crate) fn opens_blob(line: &str) -> bool {
    let opening = line.matches('{').count();
    let closing = line.matches('}').count();
    opening > closing
}
