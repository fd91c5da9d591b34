//! `SQLite` implementation of the `CatalogRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use gettor_core::{CatalogRepository, Link, RepositoryError, StatsEntry, StatsKey};

use super::row_mappers::{
    LINK_SELECT_COLUMNS, NO_PLATFORM, map_sqlx_error, row_to_link, row_to_stats_entry,
};

/// `SQLite` implementation of the `CatalogRepository` trait.
///
/// `links` is read-only here. `stats` is only ever written through a
/// single upsert statement, so concurrent bumps serialize on the SQLite
/// write lock instead of racing a read-then-write.
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    /// Create a new `SQLite` catalog repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn increment_stats(&self, key: &StatsKey) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO stats (num_requests, platform, command, service, date)
            VALUES (1, ?, ?, ?, ?)
            ON CONFLICT(date, platform, command, service) DO UPDATE SET
                num_requests = num_requests + 1
            "#,
        )
        .bind(key.platform.as_deref().unwrap_or(NO_PLATFORM))
        .bind(&key.command)
        .bind(&key.service)
        .bind(&key.date)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn stats_for_date(&self, date: &str) -> Result<Vec<StatsEntry>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT date, platform, command, service, num_requests
            FROM stats
            WHERE date = ?
            ORDER BY command, service, platform
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_stats_entry).collect()
    }

    async fn links(&self, platform: &str, status: &str) -> Result<Vec<Link>, RepositoryError> {
        let sql = format!(
            "SELECT {LINK_SELECT_COLUMNS} FROM links WHERE platform = ? AND status = ? ORDER BY rowid"
        );

        let rows = sqlx::query(&sql)
            .bind(platform)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_link).collect()
    }
}
