//! Configuration data structures and schema parsing.
//!
//! - [`schema`] - Schema document parsing: sections, options, declared layout
//! - [`item`] - Option definitions, kinds, values and coordinates
//! - [`store`] - Current values and the combined [`Config`]
//! - [`layout`] - Tabs and groups resolved to coordinates
//! - [`validate`] - Range checks against the schema
//! - [`defaults`] - Reset to declared defaults
//! - [`editor`] - Editing session with unsaved-changes tracking

/// Reset to declared defaults.
pub mod defaults;

/// Editing session state shared with the front end.
pub mod editor;

/// Individual option definitions and values.
pub mod item;

/// Presentation layout resolved against the schema.
pub mod layout;

/// Schema document parsing.
pub mod schema;

/// Current values and the combined configuration.
pub mod store;

/// Range validation of current values.
pub mod validate;

pub use editor::Editor;
pub use item::{Coord, OptionDef, OptionKind, Value};
pub use layout::Layout;
pub use schema::Schema;
pub use store::Config;
