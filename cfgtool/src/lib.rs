//! # cfgtool
//!
//! Terminal configuration tool built on [`cfgkit`].
//!
//! `cfgtool` loads a schema document, reads the settings file next to it,
//! lets the user edit the options in a terminal UI, saves them and can
//! start a program from the same directory afterwards.
//!
//! ## Modules
//!
//! - [`commands`] - Subcommand handlers
//! - [`ctx`] - Application context built from the command line

/// Subcommand handlers.
pub mod commands;

/// Application context and path resolution.
pub mod ctx;

#[macro_use]
extern crate log;

pub use cfgkit::cursive;
