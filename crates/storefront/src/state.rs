//! Application state shared across the storefront.

use std::sync::Arc;

use daisy_client::{ApiClient, ClientConfig, Storage, StorageError};

use crate::auth::AuthStore;
use crate::cart::CartStore;
use crate::wishlist::WishlistStore;

/// Aggregate of the storefront's stores, constructed once at application
/// start.
///
/// Cheaply cloneable via `Arc`. A long-running client never tears this
/// down; tests build a fresh instance per case over in-memory storage.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    api: ApiClient,
    auth: AuthStore,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl AppState {
    /// Create the application state over the configured storage file.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file exists but cannot be read.
    pub async fn new(config: ClientConfig) -> Result<Self, StorageError> {
        let storage = Storage::open(&config.storage_path).await?;
        Ok(Self::with_storage(config, storage).await)
    }

    /// Create the application state over an explicit storage handle.
    ///
    /// Tests inject `Storage::memory()` here.
    pub async fn with_storage(config: ClientConfig, storage: Storage) -> Self {
        let api = ApiClient::new(&config, storage.clone());
        let auth = AuthStore::restore(api.clone(), storage.clone()).await;
        let cart = CartStore::restore(storage.clone()).await;
        let wishlist = WishlistStore::restore(storage).await;

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                auth,
                cart,
                wishlist,
            }),
        }
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the REST adapter.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the customer session store.
    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_state_is_empty() {
        let state = AppState::with_storage(ClientConfig::default(), Storage::memory()).await;
        assert!(!state.auth().is_authenticated().await);
        assert!(state.cart().items().await.is_empty());
        assert!(state.wishlist().items().await.is_empty());
    }

    #[tokio::test]
    async fn test_stores_share_storage() {
        let storage = Storage::memory();
        {
            let state =
                AppState::with_storage(ClientConfig::default(), storage.clone()).await;
            let piece = crate::catalog::seed::catalog().first().unwrap().clone();
            state.cart().add(&piece, 1, None, None).await.unwrap();
            state.wishlist().add(&piece).await.unwrap();
        }

        // A second state over the same storage sees the snapshots
        let state = AppState::with_storage(ClientConfig::default(), storage).await;
        assert_eq!(state.cart().total_items().await, 1);
        assert_eq!(state.wishlist().items().await.len(), 1);
    }
}
