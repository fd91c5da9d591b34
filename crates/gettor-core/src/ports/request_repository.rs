//! Request repository trait definition.
//!
//! This port defines the interface for the `requests` ledger.
//! Implementations handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewRequest, Request, RequestRekey};

/// Repository for inbound service requests.
///
/// # Design Rules
///
/// - Exact-match filters only, no partial or range matching
/// - Rows are never deleted through this port
/// - Status transitions are not validated here
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Insert exactly one new request row.
    async fn insert(&self, request: &NewRequest) -> Result<(), RepositoryError>;

    /// List requests matching `status`, `command` and `service`, in insertion order.
    async fn list(
        &self,
        status: &str,
        command: &str,
        service: &str,
    ) -> Result<Vec<Request>, RepositoryError>;

    /// Count requests for a requester on one service.
    async fn count(&self, id: &str, service: &str) -> Result<u64, RepositoryError>;

    /// Re-key the rows identified by `(id, service, date)`.
    ///
    /// Returns the number of rows touched; zero is not an error.
    async fn rekey(&self, rekey: &RequestRekey) -> Result<u64, RepositoryError>;
}
