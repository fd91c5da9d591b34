//! Stats command handlers.

use anyhow::Result;
use gettor_core::today_stamp;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, print_json, print_separator};

/// Count one request for today.
pub async fn bump(
    ctx: &CliContext,
    command: &str,
    service: &str,
    platform: Option<&str>,
) -> Result<()> {
    ctx.app()
        .catalog()
        .update_stats(command, service, platform)
        .await
        .ok_or_else(|| CliError::Database("stats update failed, see log".into()))?;

    println!("Counted {command}/{service} for {}", today_stamp());
    Ok(())
}

/// Show the counters for `date` (today by default).
pub async fn show(ctx: &CliContext, date: Option<&str>, json: bool) -> Result<()> {
    let date = date.map_or_else(today_stamp, str::to_string);
    let stats = ctx.app().catalog().stats_for(&date).await;

    if json {
        print_json(&stats)?;
        return Ok(());
    }

    if stats.is_empty() {
        println!("No requests counted on {date}.");
        return Ok(());
    }

    println!("{:<10} {:<10} {:<10} {:>8}", "Command", "Service", "Platform", "Requests");
    print_separator(41);

    for entry in &stats {
        println!(
            "{:<10} {:<10} {:<10} {:>8}",
            entry.command,
            entry.service,
            format_optional(entry.platform.as_ref(), "--"),
            entry.num_requests
        );
    }

    let total: i64 = stats.iter().map(|s| s.num_requests).sum();
    println!("\nTotal on {date}: {total}");
    Ok(())
}
