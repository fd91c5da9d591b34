//! Core domain types, ports and store services for the GetTor datastore.
//!
//! This crate knows nothing about SQLite. It defines the request, link and
//! stats records, the repository ports that `gettor-db` implements, and the
//! `RequestStore`/`CatalogStore` services the request handler talks to.

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{Link, NewRequest, Request, RequestRekey, RequestStatus, StatsEntry, StatsKey};
pub use ports::{CatalogRepository, Repos, RepositoryError, RequestRepository};
pub use services::{AppCore, CatalogStore, RequestStore, today_stamp};
pub use settings::{
    DEFAULT_BUSY_TIMEOUT_SECS, DEFAULT_DB_MAX_CONNECTIONS, Settings, SettingsError,
    validate_settings,
};

// Re-export path utilities
pub use paths::{PathError, expand_tilde, resolve_config_path};
