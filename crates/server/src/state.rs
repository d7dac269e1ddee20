//! Application state shared across handlers.

use std::sync::Arc;

use ub_jewellers_core::CollectionName;

use crate::config::ServerConfig;
use crate::db::{DocumentRepository, DocumentStore, ProductRepository};
use crate::services::auth::TokenService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns the single document
/// store handle. Handlers borrow the store; only the process bootstrap closes
/// it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Arc<dyn DocumentStore>,
    tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `store` - Document store for all collections
    #[must_use]
    pub fn new(config: ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        let tokens = TokenService::new(&config.jwt_secret);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                tokens,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Accessor for the `products` collection.
    #[must_use]
    pub fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self.store())
    }

    /// Pass-through accessor for any collection.
    #[must_use]
    pub fn collection(&self, collection: CollectionName) -> DocumentRepository<'_> {
        DocumentRepository::new(self.store(), collection)
    }
}
