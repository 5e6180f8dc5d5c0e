//! # cfgkit
//!
//! Schema-driven option editor core with flat ini persistence.
//!
//! A schema document declares sections of typed options (checkboxes, lists,
//! pads, free text) plus a presentation layout of tabs and groups. cfgkit
//! keeps the schema and the current values apart, validates values against
//! the schema, resets them to defaults and stores them in a plain
//! `[Section]` / `Name=value` settings file.
//!
//! ## Features
//!
//! - JSON or TOML schema documents, chosen by file extension
//! - Tolerant loading: a malformed option degrades, it never aborts the load
//! - Layout references resolved once, failures collected instead of raised
//! - Write-then-replace saving, never a truncated settings file
//! - A Cursive front end with unsaved-changes tracking and save & launch
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cfgkit::data::{Coord, Editor, Value};
//!
//! let mut editor = Editor::open("config.json", Some("settings.ini")).unwrap();
//! editor.apply_edit(Coord::new(0, 0), Value::Int(1)).unwrap();
//! editor.save().unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema, values, layout, validation and defaults
//! - [`ini`] - Settings file codec
//! - [`strings`] - Localized program and option strings
//! - [`launch`] - Launch target discovery
//! - [`run`] - TUI runner
//! - [`ui`] - Cursive views and callbacks

#[macro_use]
extern crate log;

/// Schema, values, layout, validation and defaults.
pub mod data;

/// Error types.
pub mod error;

/// Settings file reading and writing.
pub mod ini;

/// Launch target discovery and process start.
pub mod launch;

/// TUI application runner.
pub mod run;

/// User-facing strings with compiled-in fallbacks.
pub mod strings;

/// Cursive views and callbacks.
pub mod ui;

#[cfg(test)]
mod test_support;

pub use error::{IndexError, LaunchError, ResolutionError, SaveError, SchemaError};
pub use run::*;
