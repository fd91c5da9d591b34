//! Store services - the surface the request handler talks to.
//!
//! Services wrap the repository ports and own the error policy: every
//! query goes through [`dispatch`], which runs it on its own task and
//! funnels the outcome through one logging path. Failures resolve to an
//! absent or empty value instead of propagating to the caller.

mod app_core;
mod catalog_store;
mod request_store;

pub use app_core::AppCore;
pub use catalog_store::{CatalogStore, today_stamp};
pub use request_store::RequestStore;

use std::future::Future;

use tracing::{debug, error};

use crate::ports::RepositoryError;

/// Submit a query and wait for its outcome.
///
/// The query is spawned before it is awaited, so a caller that stops
/// waiting does not cancel it: once submitted it runs to completion or
/// failure. Must be called from within a tokio runtime.
pub(crate) async fn dispatch<T, F>(operation: &'static str, query: F) -> Option<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, RepositoryError>> + Send + 'static,
{
    let outcome = tokio::spawn(query)
        .await
        .unwrap_or_else(|e| Err(RepositoryError::Task(e.to_string())));
    settle(operation, outcome)
}

/// Log a query outcome and collapse it to an `Option`.
pub(crate) fn settle<T>(operation: &'static str, outcome: Result<T, RepositoryError>) -> Option<T> {
    match outcome {
        Ok(value) => {
            debug!(operation, "Database query executed successfully");
            Some(value)
        }
        Err(e) => {
            error!(operation, error = %e, "Database error");
            None
        }
    }
}
