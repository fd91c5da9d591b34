//! Init command handler.
//!
//! Bootstrap already created the file and any missing tables; this only
//! reports where the database lives.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Execute the init command.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("Database ready at {}", ctx.db_path().display());
    Ok(())
}
