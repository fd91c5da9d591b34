//! Command handlers that delegate to `AppCore`.
//!
//! Each module exposes one function per subcommand taking
//! `ctx: &CliContext` and returning `anyhow::Result<()>`: `init::execute`,
//! `links::execute`, `requests::{record, update, list, count}` and
//! `stats::{bump, show}`. Only `init::execute` is synchronous.
//!
//! Handlers are thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call the stores on `AppCore`
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Access repositories directly
//! - Contain business logic
//! - Manage database connections

pub mod init;
pub mod links;
pub mod requests;
pub mod stats;
