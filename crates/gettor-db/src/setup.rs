//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for opening the
//! `SQLite` file behind both stores. Entry points call this once with the
//! resolved database path and close the pool on shutdown.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use gettor_core::Settings;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::{info, warn};

/// Connection pool tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbOptions {
    /// Upper bound on concurrent connections.
    pub max_connections: u32,
    /// How long a writer waits for the file lock before the query fails.
    pub busy_timeout: Duration,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            max_connections: gettor_core::DEFAULT_DB_MAX_CONNECTIONS,
            busy_timeout: Duration::from_secs(gettor_core::DEFAULT_BUSY_TIMEOUT_SECS),
        }
    }
}

impl DbOptions {
    /// Pool options from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_connections: settings.db_max_connections,
            busy_timeout: Duration::from_secs(settings.db_busy_timeout_secs),
        }
    }
}

/// Sets up the `SQLite` database connection pool and ensures the schema exists.
///
/// This function:
/// 1. Creates the parent directory if needed
/// 2. Opens (or creates) the database file in WAL mode with a busy timeout
/// 3. Creates any missing tables and indexes
///
/// # Example
///
/// ```rust,no_run
/// use gettor_db::{DbOptions, setup_database};
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/srv/gettor/gettor.db"), &DbOptions::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path, options: &DbOptions) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(db_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(options.busy_timeout),
        )
        .await?;

    create_schema(&pool).await?;

    info!(
        path = %db_path.display(),
        max_connections = options.max_connections,
        "Database ready"
    );
    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// One connection, so every query sees the same in-memory file.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Close the pool, waiting for in-flight queries to finish.
pub async fn close_database(pool: &SqlitePool) {
    pool.close().await;
    info!("Database closed");
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all operations use IF NOT EXISTS.
/// Tables that already exist are left as they are.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Request ledger; rowid gives insertion order
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS requests (
            id TEXT NOT NULL,
            command TEXT NOT NULL,
            platform TEXT,
            service TEXT NOT NULL,
            date TEXT NOT NULL,
            status TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Per-requester counts for rate limiting
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_requests_id_service ON requests(id, service)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_requests_pipeline ON requests(service, command, status)",
    )
    .execute(pool)
    .await?;

    // Daily counters. A missing platform is stored as '' because NULLs
    // never collide in a primary key and would defeat the upsert.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stats (
            num_requests INTEGER NOT NULL DEFAULT 1,
            platform TEXT NOT NULL DEFAULT '',
            command TEXT NOT NULL,
            service TEXT NOT NULL,
            date TEXT NOT NULL,
            PRIMARY KEY (date, platform, command, service)
        )
        "#,
    )
    .execute(pool)
    .await?;

    match merge_null_platform_stats(pool).await {
        Ok(0) => {}
        Ok(merged) => info!(merged, "Merged stats rows with no platform"),
        Err(e) => warn!(error = %e, "Could not merge stats rows with no platform"),
    }

    // Link catalog, filled by the link-sync job
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS links (
            link TEXT NOT NULL,
            platform TEXT NOT NULL,
            arch TEXT,
            version TEXT,
            provider TEXT,
            status TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_links_platform ON links(platform, status)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Folds `stats` rows with a NULL platform into the `''` row for the same key.
///
/// Databases written by the earlier service may hold such rows, and the
/// upsert never matches them. Returns how many NULL rows were folded in.
async fn merge_null_platform_stats(pool: &SqlitePool) -> Result<u64> {
    let (legacy,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stats WHERE platform IS NULL")
        .fetch_one(pool)
        .await?;
    if legacy == 0 {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO stats (num_requests, platform, command, service, date)
        SELECT num_requests, '', command, service, date FROM stats WHERE platform IS NULL
        ON CONFLICT(date, platform, command, service)
        DO UPDATE SET num_requests = num_requests + excluded.num_requests
        "#,
    )
    .execute(&mut *tx)
    .await?;
    let merged = sqlx::query("DELETE FROM stats WHERE platform IS NULL")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_database() {
        let pool = setup_test_database().await.unwrap();

        // Verify tables exist by querying them
        for table in ["requests", "stats", "links"] {
            let _: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&pool)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let pool = setup_test_database().await.unwrap();
        create_schema(&pool).await.unwrap();
        create_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_schema_merges_null_platform_stats() {
        use crate::SqliteCatalogRepository;
        use gettor_core::{CatalogRepository, StatsKey};

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            r#"
            CREATE TABLE stats (
                num_requests INTEGER,
                platform TEXT,
                command TEXT NOT NULL,
                service TEXT NOT NULL,
                date TEXT NOT NULL,
                UNIQUE (date, platform, command, service)
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        for (count, platform) in [(2, None), (3, None), (1, Some("")), (4, Some("linux"))] {
            sqlx::query("INSERT INTO stats VALUES (?, ?, 'help', 'email', '20240101')")
                .bind(count)
                .bind(platform)
                .execute(&pool)
                .await
                .unwrap();
        }

        create_schema(&pool).await.unwrap();

        let rows: Vec<(Option<String>, i64)> =
            sqlx::query_as("SELECT platform, num_requests FROM stats ORDER BY platform")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(rows, vec![(Some(String::new()), 6), (Some("linux".into()), 4)]);

        // A platform-less bump now lands on the merged row.
        let repo = SqliteCatalogRepository::new(pool.clone());
        let key = StatsKey {
            date: "20240101".into(),
            platform: None,
            command: "help".into(),
            service: "email".into(),
        };
        repo.increment_stats(&key).await.unwrap();

        let stats = repo.stats_for_date("20240101").await.unwrap();
        let merged: Vec<_> = stats.iter().filter(|s| s.platform.is_none()).collect();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].num_requests, 7);
    }

    #[tokio::test]
    async fn test_links_accept_repeated_rows() {
        let pool = setup_test_database().await.unwrap();
        for _ in 0..2 {
            sqlx::query(
                "INSERT INTO links (link, platform, arch, version, provider, status) \
                 VALUES ('https://example.org/tb.tar.xz', 'linux', 'x86_64', '13.0', 'github', 'active')",
            )
            .execute(&pool)
            .await
            .unwrap();
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM links")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_setup_database_creates_file_and_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("gettor.db");

        let pool = setup_database(&db_path, &DbOptions::default()).await.unwrap();
        assert!(db_path.exists());

        close_database(&pool).await;
        assert!(pool.is_closed());
    }

    #[test]
    fn test_options_from_settings() {
        let settings = Settings {
            db_max_connections: 2,
            db_busy_timeout_secs: 9,
            ..Settings::with_defaults()
        };
        let options = DbOptions::from_settings(&settings);
        assert_eq!(options.max_connections, 2);
        assert_eq!(options.busy_timeout, Duration::from_secs(9));
    }
}
