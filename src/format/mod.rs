//! Configuration format engine
//!
//! Reads and writes the INI dialect used by `project.godot` and
//! `export_presets.cfg`. Compared to plain INI the dialect adds:
//! - string arrays written as `key=PackedStringArray("a", "b")`
//! - quoted strings that continue over several physical lines
//! - inline brace-delimited structures, kept as opaque text
//!
//! Decoding runs raw bytes through the [`sanitize`] pass, reads the canonical
//! [`Line`]s into a [`Store`], and resolves each key into a [`Value`] of a
//! [`Document`]. Typed records bind to documents with [`from_table`] /
//! [`from_entries`] and project back with [`to_table`]. [`encode`] writes a
//! document in the original dialect.

mod de;
mod document;
mod encode;
mod error;
mod sanitize;
mod ser;
mod store;

pub use de::{from_entries, from_table};
pub use document::{Document, Table, Value};
pub use encode::{encode, format_value};
pub use error::{BindError, FormatError, SpanKind};
pub use sanitize::{sanitize, Line, ARRAY_CONSTRUCTOR, NEWLINE_SENTINEL};
pub use ser::to_table;
pub use store::{Entry, Section, Store, DEFAULT_SECTION};
