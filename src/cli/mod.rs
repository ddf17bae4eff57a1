//! CLI module
//!
//! Command-line interface for the tap.
//!
//! # Commands
//!
//! - `discover` - Print the catalog built from the schema directory
//! - `sync` - Extract selected streams as JSON-lines messages on stdout
//! - `ddl` - Print warehouse table definitions for the report streams

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{ddl_statements, Runner};
