//! Settings domain types, loading and validation.
//!
//! Settings live in a JSON file. Keys missing from the file take the
//! defaults below and unknown keys are ignored, so one file can be shared
//! with the mail and Twitter front-ends.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::paths::{PathError, expand_tilde};

/// Default upper bound on pooled database connections.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Default time a writer waits on the SQLite lock before failing.
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

/// Application settings structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Platforms links are served for.
    pub platforms: Vec<String>,

    /// Path to the SQLite database file (`~` is expanded).
    pub dbname: String,

    /// Requests allowed per requester over email.
    pub email_requests_limit: u32,

    /// Requests allowed per requester over Twitter.
    pub twitter_requests_limit: u32,

    /// Upper bound on pooled database connections (1-64).
    pub db_max_connections: u32,

    /// Seconds a writer waits for the database lock.
    pub db_busy_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Settings {
    /// Create settings with the service's shipped defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            platforms: vec!["linux".into(), "osx".into(), "windows".into()],
            dbname: "/srv/gettor.torproject.org/home/gettor/gettor.db".into(),
            email_requests_limit: 30,
            twitter_requests_limit: 1,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            db_busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
        }
    }

    /// Load settings from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::with_defaults());
        }

        let raw = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = serde_json::from_str(&raw).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Resolved database file path.
    pub fn db_path(&self) -> Result<PathBuf, PathError> {
        expand_tilde(&self.dbname)
    }

    /// Per-requester allowance for `service`, `None` when the service is unlimited.
    #[must_use]
    pub fn requests_limit(&self, service: &str) -> Option<u32> {
        match service {
            "email" => Some(self.email_requests_limit),
            "twitter" => Some(self.twitter_requests_limit),
            _ => None,
        }
    }
}

/// Settings loading or validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Malformed settings file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Database path (dbname) cannot be empty")]
    EmptyDbName,

    #[error("Database pool size must be between 1 and 64, got {0}")]
    InvalidPoolSize(u32),

    #[error("Database busy timeout must be at least one second")]
    InvalidBusyTimeout,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.dbname.trim().is_empty() {
        return Err(SettingsError::EmptyDbName);
    }

    if !(1..=64).contains(&settings.db_max_connections) {
        return Err(SettingsError::InvalidPoolSize(settings.db_max_connections));
    }

    if settings.db_busy_timeout_secs == 0 {
        return Err(SettingsError::InvalidBusyTimeout);
    }

    Ok(())
}
