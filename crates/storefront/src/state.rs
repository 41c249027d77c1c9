//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::store::{OrderStore, ProductStore, StoreError, UserStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the three collection stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: ProductStore,
    users: UserStore,
    orders: OrderStore,
}

impl AppState {
    /// Load all stores from the configured data directory.
    ///
    /// The products file must already exist; user and order files are
    /// created empty on first run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if any collection fails to load - including
    /// [`StoreError::Corrupt`] for files with the wrong shape. Callers must
    /// treat this as fatal: a storefront with a broken store must not serve
    /// traffic.
    pub async fn load(config: StorefrontConfig) -> Result<Self, StoreError> {
        let products = ProductStore::load(config.products_file()).await?;
        let users = UserStore::open(config.users_file()).await?;
        let orders = OrderStore::open(config.orders_file()).await?;

        tracing::info!(
            products = products.count().await,
            users = users.count().await,
            orders = orders.count().await,
            "stores loaded"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                users,
                orders,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }
}
