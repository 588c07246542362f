//! CLI arguments

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Dynamic inventory backed by the CMDB API
#[derive(Parser, Debug)]
#[command(name = "cmdb-inventory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the whole inventory (default when no mode is given)
    #[arg(long, conflicts_with = "host")]
    pub list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "HOSTNAME")]
    pub host: Option<String>,

    /// Plugin configuration file (*portal.yml / *portal.yaml)
    #[arg(short, long, env = "CMDB_INVENTORY_CONFIG")]
    pub inventory: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level implied by the verbosity flag
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
