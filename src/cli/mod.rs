//! CLI module
//!
//! Executable-inventory interface.
//!
//! # Modes
//!
//! - `--list` - Print the whole inventory (default)
//! - `--host <name>` - Print the variables of one host

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
