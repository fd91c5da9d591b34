//! `AppCore` - the primary application facade.
//!
//! Adapters (the CLI, the request handler) receive an `AppCore` instance
//! and use it to reach both stores.

use crate::ports::Repos;

use super::{CatalogStore, RequestStore};

/// The core application facade.
///
/// Constructed at the adapter's composition root with concrete
/// repositories.
///
/// # Example
///
/// ```ignore
/// let pool = gettor_db::setup_database(&db_path, &options).await?;
/// let core = CoreFactory::build_app_core(pool);
///
/// let links = core.catalog().get_links("linux", "active").await;
/// ```
#[derive(Clone)]
pub struct AppCore {
    requests: RequestStore,
    catalog: CatalogStore,
}

impl AppCore {
    /// Create a new `AppCore` with the given repositories.
    pub fn new(repos: Repos) -> Self {
        Self {
            requests: RequestStore::new(repos.requests),
            catalog: CatalogStore::new(repos.catalog),
        }
    }

    /// Access the request store.
    pub const fn requests(&self) -> &RequestStore {
        &self.requests
    }

    /// Access the catalog store.
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }
}
