//! SQLite adapters for the GetTor datastore.
//!
//! Implements the `gettor-core` repository ports on top of one `sqlx`
//! connection pool, and provides the schema bootstrap and factory used by
//! entry points.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{SqliteCatalogRepository, SqliteRequestRepository};

// Pool type for entry points
pub use sqlx::SqlitePool;

// Re-export setup functions for convenient access
pub use setup::{DbOptions, close_database, create_schema, setup_database};
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
