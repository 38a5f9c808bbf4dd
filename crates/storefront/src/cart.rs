//! Cart store.
//!
//! Lines are held as an association list keyed by [`LineKey`] (product id
//! plus variant selection), so "at most one line per selection" is a
//! structural property: an add with an identical selection increments the
//! existing line, a differing selection appends a new one. Insertion order
//! is preserved for rendering.
//!
//! Every mutation persists the full line collection to durable storage
//! before returning; the drawer visibility flag is UI state only and is
//! never persisted.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use daisy_client::{Storage, StorageError, keys};
use daisy_core::{CartItem, LineKey, Product};

#[derive(Default)]
struct CartState {
    items: Vec<CartItem>,
    is_open: bool,
}

struct CartInner {
    storage: Storage,
    state: RwLock<CartState>,
}

/// Cart store handle.
///
/// Cheaply cloneable; all clones share the same lines and storage.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartInner>,
}

impl CartStore {
    /// Construct the store, restoring any persisted snapshot.
    ///
    /// An unreadable snapshot starts the cart empty rather than failing.
    pub async fn restore(storage: Storage) -> Self {
        let items: Vec<CartItem> = storage.get_json(keys::CART).await.unwrap_or_default();
        if !items.is_empty() {
            debug!(lines = items.len(), "Restored cart snapshot");
        }

        Self {
            inner: Arc::new(CartInner {
                storage,
                state: RwLock::new(CartState {
                    items,
                    is_open: false,
                }),
            }),
        }
    }

    /// Add a product selection to the cart.
    ///
    /// An existing line with the same [`LineKey`] has its quantity
    /// incremented by `quantity`; otherwise a new line is appended. A zero
    /// `quantity` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the snapshot fails; the in-memory
    /// mutation still applies.
    pub async fn add(
        &self,
        product: &Product,
        quantity: u32,
        color: Option<String>,
        size: Option<String>,
    ) -> Result<(), StorageError> {
        if quantity == 0 {
            return Ok(());
        }

        let key = LineKey::with_selection(product.id, color.clone(), size.clone());
        let mut state = self.inner.state.write().await;

        if let Some(line) = state.items.iter_mut().find(|item| item.key() == key) {
            line.quantity += quantity;
        } else {
            state.items.push(CartItem {
                product: product.clone(),
                quantity,
                selected_color: color,
                selected_size: size,
            });
        }

        self.persist(&state).await
    }

    /// Set the quantity of a line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the snapshot fails.
    pub async fn update_quantity(&self, key: &LineKey, quantity: u32) -> Result<(), StorageError> {
        let mut state = self.inner.state.write().await;

        if quantity == 0 {
            state.items.retain(|item| item.key() != *key);
        } else if let Some(line) = state.items.iter_mut().find(|item| item.key() == *key) {
            line.quantity = quantity;
        } else {
            return Ok(());
        }

        self.persist(&state).await
    }

    /// Remove a line. Removing an absent line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the snapshot fails.
    pub async fn remove(&self, key: &LineKey) -> Result<(), StorageError> {
        let mut state = self.inner.state.write().await;
        let before = state.items.len();
        state.items.retain(|item| item.key() != *key);
        if state.items.len() == before {
            return Ok(());
        }
        self.persist(&state).await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the snapshot fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.inner.state.write().await;
        state.items.clear();
        self.persist(&state).await
    }

    /// Current lines, in insertion order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.inner.state.read().await.items.clone()
    }

    /// Total number of units across all lines.
    pub async fn total_items(&self) -> u32 {
        self.inner
            .state
            .read()
            .await
            .items
            .iter()
            .map(|item| item.quantity)
            .sum()
    }

    /// Total price across all lines.
    pub async fn total_price(&self) -> Decimal {
        self.inner
            .state
            .read()
            .await
            .items
            .iter()
            .map(CartItem::line_total)
            .sum()
    }

    /// Show the cart drawer. UI state only.
    pub async fn open(&self) {
        self.inner.state.write().await.is_open = true;
    }

    /// Hide the cart drawer. UI state only.
    pub async fn close(&self) {
        self.inner.state.write().await.is_open = false;
    }

    /// Whether the cart drawer is showing.
    pub async fn is_open(&self) -> bool {
        self.inner.state.read().await.is_open
    }

    async fn persist(&self, state: &CartState) -> Result<(), StorageError> {
        self.inner.storage.set_json(keys::CART, &state.items).await
    }
}
