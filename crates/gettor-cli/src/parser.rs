//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the GetTor request/stats/links datastore.
#[derive(Parser)]
#[command(name = "gettor")]
#[command(about = "Inspect and maintain the GetTor request datastore")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(short = 'c', long = "config", env = "GETTOR_CONFIG", global = true)]
    pub config: Option<String>,

    /// Override the database path from the settings file
    #[arg(long = "db", env = "GETTOR_DB", global = true)]
    pub db: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
