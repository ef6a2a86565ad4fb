//! Projection of typed records into document tables

use serde::Serialize;
use serde_json::Value as Json;

use super::document::{Table, Value};
use super::error::FormatError;

/// Project a typed record into `key -> Value` pairs.
///
/// `None` fields are left out. Nested structures and lists of anything other
/// than strings have no representation in the format and are rejected.
pub fn to_table<T: Serialize>(target: &str, record: &T) -> Result<Table, FormatError> {
    let json = serde_json::to_value(record)
        .map_err(|e| FormatError::unsupported(target, e.to_string()))?;

    let Json::Object(fields) = json else {
        return Err(FormatError::unsupported(
            target,
            "only records with named fields can be written",
        ));
    };

    let mut table = Table::new();
    for (key, field) in fields {
        let path = format!("{}.{}", target, key);
        let value = match field {
            Json::Null => continue,
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => match n.as_f64() {
                    Some(f) => Value::Float(f),
                    None => return Err(FormatError::unsupported(path, "number out of range")),
                },
            },
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Json::String(s) => Ok(s),
                        other => Err(FormatError::unsupported(
                            path.as_str(),
                            format!("list element {} is not a string", other),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Json::Object(_) => {
                return Err(FormatError::unsupported(path, "nested records are not supported"));
            }
        };
        table.insert(key, value);
    }

    Ok(table)
}
