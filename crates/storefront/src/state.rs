//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::services::PurchaseLogClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the remote service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: SqlitePool,
    catalog: CatalogClient,
    purchases: PurchaseLogClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `SQLite` connection pool
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: SqlitePool) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let purchases = PurchaseLogClient::new(&config.purchase_log_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                purchases,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the movie catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the purchase logging client.
    #[must_use]
    pub fn purchases(&self) -> &PurchaseLogClient {
        &self.inner.purchases
    }
}
