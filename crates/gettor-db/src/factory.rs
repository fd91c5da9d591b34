//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the stores with
//! `SQLite` repositories. It is focused purely on construction and should
//! not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use gettor_core::{AppCore, Repos};

use crate::repositories::{SqliteCatalogRepository, SqliteRequestRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// Every repository shares the same pool, so the process holds one
    /// bounded set of connections to the database file.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteRequestRepository::new(pool.clone())),
            Arc::new(SqliteCatalogRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` instance from a pool.
    ///
    /// ```ignore
    /// let pool = setup_database(&db_path, &DbOptions::default()).await?;
    /// let core = CoreFactory::build_app_core(pool.clone());
    /// // ...
    /// close_database(&pool).await;
    /// ```
    pub fn build_app_core(pool: SqlitePool) -> AppCore {
        AppCore::new(Self::build_repos(pool))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a request repository using this test database.
    pub fn request_repository(&self) -> SqliteRequestRepository {
        SqliteRequestRepository::new(self.pool.clone())
    }

    /// Create a catalog repository using this test database.
    pub fn catalog_repository(&self) -> SqliteCatalogRepository {
        SqliteCatalogRepository::new(self.pool.clone())
    }

    /// Build an `AppCore` on this test database.
    pub fn app_core(&self) -> AppCore {
        CoreFactory::build_app_core(self.pool.clone())
    }

    /// Seed a catalog link, standing in for the link-sync job.
    pub async fn insert_link(&self, link: &gettor_core::Link) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO links (link, platform, arch, version, provider, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&link.link)
        .bind(&link.platform)
        .bind(&link.arch)
        .bind(&link.version)
        .bind(&link.provider)
        .bind(&link.status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
