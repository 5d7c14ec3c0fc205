// CLI module for id3scan
//
// Command-line front end over the library: argument parsing, logging setup,
// output formatting and the per-command drivers.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;

pub use config::{Commands, Config};

/// Result type for CLI operations
pub type CliResult<T> = anyhow::Result<T>;
