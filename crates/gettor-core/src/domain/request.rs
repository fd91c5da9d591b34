//! Request domain types.

use serde::{Deserialize, Serialize};

/// A request row as stored in the `requests` table.
///
/// Every field is opaque text owned by the request handler. `id` is not
/// unique: the same requester shows up once per request, and the handler
/// re-keys rows to a hashed identifier once they are processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    pub command: String,
    pub platform: Option<String>,
    pub service: String,
    pub date: String,
    pub status: String,
}

/// Data for recording a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    pub id: String,
    pub command: String,
    pub service: String,
    pub platform: Option<String>,
    pub date: String,
    pub status: String,
}

impl NewRequest {
    /// Create a request in the `new` state.
    pub fn new(
        id: impl Into<String>,
        command: impl Into<String>,
        service: impl Into<String>,
        platform: Option<&str>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
            service: service.into(),
            platform: platform.map(str::to_string),
            date: date.into(),
            status: RequestStatus::New.as_str().to_string(),
        }
    }

    /// Override the initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

impl From<NewRequest> for Request {
    fn from(new: NewRequest) -> Self {
        Self {
            id: new.id,
            command: new.command,
            platform: new.platform,
            service: new.service,
            date: new.date,
            status: new.status,
        }
    }
}

/// Re-key instruction for an existing request.
///
/// Targets every row matching `(id, service, date)` and rewrites its `id`
/// to `hid` and its `status` to `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRekey {
    pub id: String,
    pub hid: String,
    pub status: String,
    pub service: String,
    pub date: String,
}

/// Well-known request lifecycle states.
///
/// `new -> processed -> sent`, with `error` reachable from any non-terminal
/// state. The store does not enforce these transitions and accepts any text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    New,
    Processed,
    Sent,
    Error,
}

impl RequestStatus {
    /// Convert to string representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Processed => "processed",
            Self::Sent => "sent",
            Self::Error => "error",
        }
    }

    /// Parse from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "processed" => Some(Self::Processed),
            "sent" => Some(Self::Sent),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            RequestStatus::New,
            RequestStatus::Processed,
            RequestStatus::Sent,
            RequestStatus::Error,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RequestStatus::parse("queued"), None);
    }

    #[test]
    fn test_new_request_defaults_to_new_status() {
        let req = NewRequest::new("abc", "links", "email", Some("linux"), "20240101");
        assert_eq!(req.status, "new");
        assert_eq!(req.platform.as_deref(), Some("linux"));

        let req = req.with_status("error");
        assert_eq!(req.status, "error");
    }
}
