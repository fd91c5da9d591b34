//! Catalog repository trait definition.
//!
//! Covers the read-only `links` table and the daily `stats` counter.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Link, StatsEntry, StatsKey};

/// Repository for download links and usage statistics.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Bump the counter for `key`, creating it at 1 if absent.
    ///
    /// Implementations must do this in a single statement so concurrent
    /// callers never lose an increment or create duplicate rows.
    async fn increment_stats(&self, key: &StatsKey) -> Result<(), RepositoryError>;

    /// All counters recorded for one day.
    async fn stats_for_date(&self, date: &str) -> Result<Vec<StatsEntry>, RepositoryError>;

    /// Links for `platform` in `status`.
    async fn links(&self, platform: &str, status: &str) -> Result<Vec<Link>, RepositoryError>;
}
