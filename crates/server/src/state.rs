//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::{AdminStore, CatalogStore, MemoryStore, PgStore};
use crate::services::catalog::ImageLinks;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Stores are trait objects so the same router
/// runs over `PostgreSQL` or the in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Arc<dyn CatalogStore>,
    admins: Arc<dyn AdminStore>,
    image_links: ImageLinks,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        admins: Arc<dyn AdminStore>,
        image_links: ImageLinks,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                admins,
                image_links,
            }),
        }
    }

    /// State backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(store: PgStore, config: &ServerConfig) -> Self {
        let store = Arc::new(store);
        Self::new(
            store.clone(),
            store,
            ImageLinks::new(config.public_base_url.as_deref()),
        )
    }

    /// State backed by one in-memory store.
    #[must_use]
    pub fn in_memory(store: Arc<MemoryStore>, image_links: ImageLinks) -> Self {
        Self::new(store.clone(), store, image_links)
    }

    /// Get the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.inner.catalog.as_ref()
    }

    /// Get the admin credential store.
    #[must_use]
    pub fn admins(&self) -> &dyn AdminStore {
        self.inner.admins.as_ref()
    }

    /// Get the image URI builder.
    #[must_use]
    pub fn image_links(&self) -> &ImageLinks {
        &self.inner.image_links
    }
}
