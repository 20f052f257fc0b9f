//! Batch CLI: meeting creation, event creation, cross-system mapping.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use error::{CliError, CliResult};
