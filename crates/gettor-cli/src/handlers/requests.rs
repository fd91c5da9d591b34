//! Request ledger command handlers.

use anyhow::Result;
use gettor_core::{NewRequest, RequestStatus, today_stamp};
use tracing::warn;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, print_json, print_separator, truncate_string};

/// Arguments for recording a request.
pub struct RecordArgs<'a> {
    pub id: &'a str,
    pub command: &'a str,
    pub service: &'a str,
    pub platform: Option<&'a str>,
    pub date: Option<&'a str>,
    pub status: &'a str,
}

/// Whether `status` belongs to the pipeline's vocabulary.
///
/// Unknown values are still stored as given; this only warns.
fn check_status(status: &str) -> bool {
    let known = RequestStatus::parse(status).is_some();
    if !known {
        warn!(status, "Status is not one of new, processed, sent, error; storing as given");
    }
    known
}

/// Record a new request.
pub async fn record(ctx: &CliContext, args: RecordArgs<'_>) -> Result<()> {
    check_status(args.status);
    let date = args.date.map_or_else(today_stamp, str::to_string);
    let request = NewRequest::new(args.id, args.command, args.service, args.platform, date)
        .with_status(args.status);

    ctx.app()
        .requests()
        .record_request(request)
        .await
        .ok_or_else(|| CliError::Database("request may not have been recorded, see log".into()))?;

    println!("Recorded {} request from {} via {}", args.command, args.id, args.service);
    Ok(())
}

/// Re-key a request and set its status.
pub async fn update(
    ctx: &CliContext,
    id: &str,
    hid: &str,
    status: &str,
    service: &str,
    date: &str,
) -> Result<()> {
    check_status(status);
    let updated = ctx
        .app()
        .requests()
        .update_request(id, hid, status, service, date)
        .await
        .ok_or_else(|| CliError::Database("update failed, see log".into()))?;

    if updated == 0 {
        println!("No request matched {id}/{service}/{date}.");
    } else {
        println!("Updated {updated} request(s) to {hid} ({status}).");
    }
    Ok(())
}

/// List requests matching all three filters.
pub async fn list(
    ctx: &CliContext,
    status: &str,
    command: &str,
    service: &str,
    json: bool,
) -> Result<()> {
    let requests = ctx
        .app()
        .requests()
        .list_requests(status, command, service)
        .await;

    if json {
        print_json(&requests)?;
        return Ok(());
    }

    if requests.is_empty() {
        println!("No {status} {command} requests via {service}.");
        return Ok(());
    }

    println!("Found {} request(s):\n", requests.len());
    println!("{:<40} {:<10} {:<10} Status", "ID", "Platform", "Date");
    print_separator(75);

    for request in requests {
        println!(
            "{:<40} {:<10} {:<10} {}",
            truncate_string(&request.id, 40),
            format_optional(request.platform.as_ref(), "--"),
            truncate_string(&request.date, 10),
            request.status
        );
    }

    Ok(())
}

/// Count a requester's requests and report their rate-limit state.
pub async fn count(ctx: &CliContext, id: &str, service: &str) -> Result<()> {
    let requests = ctx.app().requests();
    let total = requests
        .count_requests(id, service)
        .await
        .ok_or_else(|| CliError::Database("count failed, see log".into()))?;

    let limit = ctx.settings().requests_limit(service);
    let limited = requests.is_rate_limited(id, service, limit).await;

    match limit {
        Some(limit) => println!(
            "{id} made {total} {service} request(s), limit {limit}{}",
            if limited { " (limited)" } else { "" }
        ),
        None => println!("{id} made {total} {service} request(s), no limit"),
    }
    Ok(())
}
