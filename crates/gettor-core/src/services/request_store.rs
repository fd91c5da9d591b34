//! Request store - the `requests` ledger as seen by the request handler.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{NewRequest, Request, RequestRekey};
use crate::ports::RequestRepository;

use super::dispatch;

/// Records requests and answers the handler's filter and count queries.
///
/// Storage faults never reach the caller: they are logged and show up as
/// `None` or an empty list, so "no result" may also mean "write may not
/// have happened". Retry policy belongs to the caller.
#[derive(Clone)]
pub struct RequestStore {
    repo: Arc<dyn RequestRepository>,
}

impl RequestStore {
    /// Create a new request store.
    pub fn new(repo: Arc<dyn RequestRepository>) -> Self {
        Self { repo }
    }

    /// Insert one new request row.
    pub async fn record_request(&self, request: NewRequest) -> Option<()> {
        let repo = Arc::clone(&self.repo);
        dispatch("record_request", async move { repo.insert(&request).await }).await
    }

    /// Requests matching all three fields exactly, in insertion order.
    pub async fn list_requests(&self, status: &str, command: &str, service: &str) -> Vec<Request> {
        let repo = Arc::clone(&self.repo);
        let (status, command, service) = (status.to_owned(), command.to_owned(), service.to_owned());
        dispatch("list_requests", async move {
            repo.list(&status, &command, &service).await
        })
        .await
        .unwrap_or_default()
    }

    /// Number of requests `id` made over `service`; `None` on storage failure.
    pub async fn count_requests(&self, id: &str, service: &str) -> Option<u64> {
        let repo = Arc::clone(&self.repo);
        let (id, service) = (id.to_owned(), service.to_owned());
        dispatch("count_requests", async move { repo.count(&id, &service).await }).await
    }

    /// Re-key the request identified by `(id, service, date)` to `hid` and set its status.
    ///
    /// Returns the number of rows updated. A missing target updates zero
    /// rows and is not reported as a failure.
    pub async fn update_request(
        &self,
        id: &str,
        hid: &str,
        status: &str,
        service: &str,
        date: &str,
    ) -> Option<u64> {
        let repo = Arc::clone(&self.repo);
        let rekey = RequestRekey {
            id: id.to_owned(),
            hid: hid.to_owned(),
            status: status.to_owned(),
            service: service.to_owned(),
            date: date.to_owned(),
        };
        let updated = dispatch("update_request", async move { repo.rekey(&rekey).await }).await;
        if updated == Some(0) {
            debug!(id, service, date, "update_request matched no rows");
        }
        updated
    }

    /// Whether `id` has used up its request allowance on `service`.
    ///
    /// `limit = None` means the service is unlimited. A count that could
    /// not be read does not block the requester.
    pub async fn is_rate_limited(&self, id: &str, service: &str, limit: Option<u32>) -> bool {
        let Some(limit) = limit else {
            return false;
        };
        self.count_requests(id, service)
            .await
            .is_some_and(|count| count >= u64::from(limit))
    }
}
