//! Error types for schema loading, coordinate access, layout resolution,
//! settings persistence and program launch.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading the schema document.
///
/// No partially loaded schema is ever returned: any of these aborts startup.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document could not be read.
    #[error("cannot read schema document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document extension is neither `json` nor `toml`.
    #[error("unsupported schema document format: {0:?}")]
    UnsupportedFormat(String),

    /// The document is not valid JSON.
    #[error("invalid JSON schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid TOML.
    #[error("invalid TOML schema document: {0}")]
    Toml(#[from] toml::de::Error),

    /// A section name is empty or contains characters the ini format reserves.
    #[error("invalid section name {name:?}: {reason}")]
    InvalidSectionName { name: String, reason: &'static str },

    /// Two sections share a name.
    #[error("duplicate section {name:?} (first declared at index {first})")]
    DuplicateSection { name: String, first: usize },
}

/// A coordinate does not address an option of the loaded schema.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no option at section {section}, option {option}")]
pub struct IndexError {
    pub section: usize,
    pub option: usize,
}

/// A layout reference names something the schema does not declare.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("layout references unknown section {section:?}")]
    UnknownSection { section: String },

    #[error("layout references unknown option {option:?} in section {section:?}")]
    UnknownOption { section: String, option: String },
}

/// Failure to write the settings file.
///
/// When this is returned the destination file is untouched.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A free-text value cannot be stored on a single `key=value` line.
    #[error("value of [{section}] {option} cannot be stored: {reason}")]
    Unrepresentable {
        section: String,
        option: String,
        reason: &'static str,
    },
}

/// Failure to start the external program.
#[derive(Error, Debug)]
#[error("cannot launch {program}: {source}")]
pub struct LaunchError {
    pub program: PathBuf,
    #[source]
    pub source: std::io::Error,
}
