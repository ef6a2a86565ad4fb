//! Services module - file-level operations around the format engine.
//!
//! # Components
//!
//! - [`discovery`]: locating `project.godot` from an explicit path or the
//!   configured search paths
//! - [`ProjectFiles`]: loading and saving the project descriptor and the
//!   export presets of one project directory
//! - [`BuildTarget`]: choosing the engine version and .NET flavour a project
//!   should be exported with
//!
//! Errors here are application errors (`anyhow`) carrying the file involved;
//! the underlying [`FormatError`](crate::format::FormatError) stays attached
//! as the source.

pub mod discovery;
pub mod project_files;
pub mod target;

pub use discovery::find_project_file;
pub use project_files::ProjectFiles;
pub use target::{BuildTarget, VersionSource};
