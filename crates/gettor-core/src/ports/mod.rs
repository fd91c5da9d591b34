//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Repository methods return typed `Result`s; swallowing errors is the
//!   job of the store services, never of the adapters

pub mod catalog_repository;
pub mod request_repository;

use std::sync::Arc;
use thiserror::Error;

pub use catalog_repository::CatalogRepository;
pub use request_repository::RequestRepository;

/// Container for all repository trait objects.
///
/// This struct provides a consistent way to wire repositories across adapters
/// without coupling them to concrete implementations. It lives in `gettor-core`
/// so that `AppCore` can accept it without depending on `gettor-db`.
#[derive(Clone)]
pub struct Repos {
    /// Request ledger (`requests` table).
    pub requests: Arc<dyn RequestRepository>,
    /// Link catalog and stats counter (`links` and `stats` tables).
    pub catalog: Arc<dyn CatalogRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        requests: Arc<dyn RequestRepository>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self { requests, catalog }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors).
/// Zero matching rows is never an error at this level.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (I/O fault, lock timeout, closed pool).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A constraint was violated (e.g., unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A stored row could not be decoded into a domain type.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The query was submitted but its task did not complete.
    #[error("Query task failed: {0}")]
    Task(String),
}
