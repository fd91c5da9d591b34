//! Link catalog and usage statistics types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for the `stats.date` column (e.g. `20240101`).
pub const STATS_DATE_FORMAT: &str = "%Y%m%d";

/// A downloadable package link from the `links` table.
///
/// Only `platform` and `status` carry meaning for this layer; the rest is
/// payload maintained by the link-sync batch job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub link: String,
    pub platform: String,
    pub arch: Option<String>,
    pub version: Option<String>,
    pub provider: Option<String>,
    pub status: String,
}

/// Identity of one daily stats counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatsKey {
    pub date: String,
    pub platform: Option<String>,
    pub command: String,
    pub service: String,
}

impl StatsKey {
    /// Build the key for the given calendar day.
    pub fn for_day(
        day: NaiveDate,
        command: impl Into<String>,
        service: impl Into<String>,
        platform: Option<&str>,
    ) -> Self {
        Self {
            date: day.format(STATS_DATE_FORMAT).to_string(),
            platform: platform.map(str::to_string),
            command: command.into(),
            service: service.into(),
        }
    }
}

/// One row of the `stats` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub date: String,
    pub platform: Option<String>,
    pub command: String,
    pub service: String,
    pub num_requests: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_key_uses_compact_date() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let key = StatsKey::for_day(day, "links", "email", Some("linux"));
        assert_eq!(key.date, "20240101");
        assert_eq!(key.platform.as_deref(), Some("linux"));
    }
}
