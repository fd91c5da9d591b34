//! Operator CLI for the GetTor datastore.
//!
//! A thin adapter over `gettor-core` stores: it resolves settings, opens
//! the database through `gettor-db`, and dispatches each subcommand to a
//! handler.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, RequestsCommand, StatsCommand};
pub use error::CliError;
pub use parser::Cli;
