//! Links command handler.
//!
//! Displays the catalog links the reply composer would send for a platform.

use anyhow::Result;
use tracing::warn;

use crate::bootstrap::CliContext;
use crate::presentation::{format_optional, print_json, print_separator, truncate_string};

/// Execute the links command.
pub async fn execute(ctx: &CliContext, platform: &str, status: &str, json: bool) -> Result<()> {
    if !ctx.settings().platforms.iter().any(|p| p == platform) {
        warn!(platform, "Platform is not in the configured platform list");
    }

    let links = ctx.app().catalog().get_links(platform, status).await;

    if json {
        print_json(&links)?;
        return Ok(());
    }

    if links.is_empty() {
        println!("No {status} links for {platform}.");
        return Ok(());
    }

    println!("{:<10} {:<10} {:<10} {:<10} Link", "Version", "Arch", "Provider", "Status");
    print_separator(90);

    for link in links {
        println!(
            "{:<10} {:<10} {:<10} {:<10} {}",
            truncate_string(&format_optional(link.version.as_ref(), "--"), 10),
            truncate_string(&format_optional(link.arch.as_ref(), "--"), 10),
            truncate_string(&format_optional(link.provider.as_ref(), "--"), 10),
            truncate_string(&link.status, 10),
            link.link
        );
    }

    Ok(())
}
