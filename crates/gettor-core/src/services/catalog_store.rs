//! Catalog store - download links and the daily usage counter.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::domain::{Link, STATS_DATE_FORMAT, StatsEntry, StatsKey};
use crate::ports::CatalogRepository;

use super::dispatch;

/// Today's date in the stats column format, local time.
pub fn today_stamp() -> String {
    Local::now().format(STATS_DATE_FORMAT).to_string()
}

/// Serves links to the reply composer and keeps the stats counter.
#[derive(Clone)]
pub struct CatalogStore {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogStore {
    /// Create a new catalog store.
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    /// Count one more request for today's `(platform, command, service)` key.
    pub async fn update_stats(
        &self,
        command: &str,
        service: &str,
        platform: Option<&str>,
    ) -> Option<()> {
        self.update_stats_on(Local::now().date_naive(), command, service, platform)
            .await
    }

    /// Same as [`update_stats`](Self::update_stats) for an explicit day.
    pub async fn update_stats_on(
        &self,
        day: NaiveDate,
        command: &str,
        service: &str,
        platform: Option<&str>,
    ) -> Option<()> {
        let repo = Arc::clone(&self.repo);
        let key = StatsKey::for_day(day, command, service, platform);
        dispatch("update_stats", async move { repo.increment_stats(&key).await }).await
    }

    /// Counters recorded on `date` (`YYYYMMDD`).
    pub async fn stats_for(&self, date: &str) -> Vec<StatsEntry> {
        let repo = Arc::clone(&self.repo);
        let date = date.to_owned();
        dispatch("stats_for", async move { repo.stats_for_date(&date).await })
            .await
            .unwrap_or_default()
    }

    /// Links for `platform` in `status`; empty when none match or the read fails.
    pub async fn get_links(&self, platform: &str, status: &str) -> Vec<Link> {
        let repo = Arc::clone(&self.repo);
        let (platform, status) = (platform.to_owned(), status.to_owned());
        dispatch("get_links", async move { repo.links(&platform, &status).await })
            .await
            .unwrap_or_default()
    }
}
