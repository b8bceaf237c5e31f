//! EventFrame CLI library.
//!
//! This library provides the core functionality for the `eventframe` command-line
//! interface, including configuration management, command execution, and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use output::Formatter;
