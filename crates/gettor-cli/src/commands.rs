//! Main commands enum and subcommands.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create the database file and any missing tables
    Init,

    /// Record, update and query service requests
    Requests {
        #[command(subcommand)]
        command: RequestsCommand,
    },

    /// Bump or show the daily usage counters
    Stats {
        #[command(subcommand)]
        command: StatsCommand,
    },

    /// List download links for a platform
    Links {
        /// Target platform (e.g. "linux", "osx", "windows")
        platform: String,
        /// Link status to match
        #[arg(short, long, default_value = "active")]
        status: String,
    },
}

/// Request ledger subcommands.
#[derive(Subcommand)]
pub enum RequestsCommand {
    /// Record a new request
    Record {
        /// Requester identifier
        id: String,
        /// Requested command (e.g. "links", "help")
        command: String,
        /// Channel the request arrived on (e.g. "email", "twitter")
        service: String,
        /// Target platform
        #[arg(short, long)]
        platform: Option<String>,
        /// Request date (defaults to today, YYYYMMDD)
        #[arg(short, long)]
        date: Option<String>,
        /// Initial status
        #[arg(short, long, default_value = "new")]
        status: String,
    },

    /// Re-key a request to a hashed identifier and set its status
    Update {
        /// Current identifier
        id: String,
        /// New (hashed) identifier
        hid: String,
        /// New status
        status: String,
        /// Channel of the request
        service: String,
        /// Date of the request
        date: String,
    },

    /// List requests matching status, command and service
    List {
        #[arg(long, default_value = "new")]
        status: String,
        #[arg(long, default_value = "links")]
        command: String,
        #[arg(long, default_value = "email")]
        service: String,
    },

    /// Count requests made by a requester over a service
    Count {
        /// Requester identifier
        id: String,
        /// Channel to count
        service: String,
    },
}

/// Stats counter subcommands.
#[derive(Subcommand)]
pub enum StatsCommand {
    /// Count one request for today
    Bump {
        /// Requested command
        command: String,
        /// Channel
        service: String,
        /// Target platform
        #[arg(short, long)]
        platform: Option<String>,
    },

    /// Show the counters for one day
    Show {
        /// Day to show (defaults to today, YYYYMMDD)
        #[arg(short, long)]
        date: Option<String>,
    },
}
