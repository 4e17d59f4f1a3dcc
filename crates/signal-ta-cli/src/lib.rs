//! signal-ta CLI library
//!
//! This module exposes the CLI components for testing and reuse.

pub mod args;
pub mod commands;
pub mod config;
pub mod csv_parser;
pub mod csv_writer;
pub mod dates;
pub mod error;
pub mod overlay;
pub mod report;

pub use error::{CliError, Result};
