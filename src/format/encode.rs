//! Document writer
//!
//! Output order is fixed: the default section first without a header, then
//! every other section sorted by name, keys sorted within each section. The
//! same logical document always produces the same bytes.

use super::document::{Document, Value};
use super::error::FormatError;
use super::sanitize::{
    ARRAY_CONSTRUCTOR, NEWLINE_SENTINEL, closes_string, is_array_line, opens_blob,
};
use super::store::DEFAULT_SECTION;

/// Encode a document into the configuration dialect
pub fn encode(document: &Document) -> Result<Vec<u8>, FormatError> {
    let mut names: Vec<&str> = document
        .section_names()
        .filter(|name| *name != DEFAULT_SECTION)
        .collect();
    names.sort_unstable();

    let mut blocks = Vec::with_capacity(names.len() + 1);

    if let Some(defaults) = document.section(DEFAULT_SECTION) {
        if !defaults.is_empty() {
            blocks.push(encode_section(document, DEFAULT_SECTION)?);
        }
    }

    for name in names {
        check_section_name(name)?;
        let mut block = format!("[{}]\n", name);
        block.push_str(&encode_section(document, name)?);
        blocks.push(block);
    }

    Ok(blocks.join("\n").into_bytes())
}

fn encode_section(document: &Document, name: &str) -> Result<String, FormatError> {
    let mut out = String::new();
    let Some(table) = document.section(name) else {
        return Ok(out);
    };

    let mut keys: Vec<&String> = table.keys().collect();
    keys.sort_unstable();

    for key in keys {
        let path = format!("{}.{}", name, key);
        check_key(&path, key)?;
        out.push_str(key);
        out.push('=');
        out.push_str(&format_value(&path, &table[key.as_str()])?);
        out.push('\n');
    }

    Ok(out)
}

/// Render one value in its on-disk form
pub fn format_value(path: &str, value: &Value) -> Result<String, FormatError> {
    let text = match value {
        Value::Array(items) => format_array(path, items)?,
        Value::String(s) if s.contains(NEWLINE_SENTINEL) || s.contains('\n') => {
            format_multiline(path, s)?
        }
        Value::String(s) => format_string(path, s)?,
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
    };
    Ok(text)
}

// Elements are split on `,` and lose one pair of quotes when read back, so
// neither may appear inside an element.
fn format_array(path: &str, items: &[String]) -> Result<String, FormatError> {
    if let Some(item) = items.iter().find(|item| item.contains('\n')) {
        return Err(FormatError::unsupported(
            path,
            format!("list element {:?} spans lines", item),
        ));
    }
    if let Some(item) = items.iter().find(|item| item.contains([',', '"'])) {
        return Err(FormatError::unsupported(
            path,
            format!("list element {:?} contains a comma or quote", item),
        ));
    }

    let quoted: Vec<String> = items.iter().map(|item| format!("\"{}\"", item)).collect();
    Ok(format!("{}({})", ARRAY_CONSTRUCTOR, quoted.join(", ")))
}

fn format_multiline(path: &str, value: &str) -> Result<String, FormatError> {
    let expanded = value.replace(NEWLINE_SENTINEL, "\n");
    let lines: Vec<&str> = expanded.split('\n').collect();

    // Lines are re-read trimmed: the opening line must not end in a quote, a
    // continuation line must not close the string or look like an array, and
    // a trailing backslash would escape the closing quote.
    if let Some((last, inner)) = lines.split_last() {
        for (index, line) in inner.iter().enumerate() {
            let line = line.trim();
            let breaks = if index == 0 {
                line.is_empty() || line.ends_with('"')
            } else {
                closes_string(line) || is_array_line(line)
            };
            if breaks {
                return Err(FormatError::unsupported(
                    path,
                    format!("line {:?} would end the multi-line string early", line),
                ));
            }
        }
        if lines.len() > 1 && is_array_line(last.trim()) {
            return Err(FormatError::unsupported(
                path,
                "the last line of a multi-line string looks like an array",
            ));
        }
        if last.trim_end().ends_with('\\') {
            return Err(FormatError::unsupported(
                path,
                "a multi-line string ends with a backslash",
            ));
        }
    }

    Ok(format!("\"{}\"", expanded))
}

fn format_string(path: &str, value: &str) -> Result<String, FormatError> {
    if opens_blob(value) {
        return Err(FormatError::unsupported(
            path,
            "an unbalanced '{' would be read as an inline structure",
        ));
    }

    if needs_quotes(value) {
        Ok(format!("\"{}\"", value))
    } else {
        Ok(value.to_string())
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.trim() != value
        || value.starts_with('"')
        || value.contains("=\"")
        || value.starts_with(ARRAY_CONSTRUCTOR)
}

fn check_section_name(name: &str) -> Result<(), FormatError> {
    let invalid = name.trim().is_empty()
        || name.trim() != name
        || name.contains(']')
        || name.contains('\n');

    if invalid {
        return Err(FormatError::unsupported(name, "invalid section name"));
    }
    Ok(())
}

fn check_key(path: &str, key: &str) -> Result<(), FormatError> {
    let invalid = key.trim().is_empty()
        || key.trim() != key
        || key.contains(['=', '\n', '{', '}'])
        || key.starts_with(['[', ';', '#']);

    if invalid {
        return Err(FormatError::unsupported(path, "invalid key"));
    }
    Ok(())
}
