//! Wishlist store.
//!
//! A persisted, set-like collection of liked products keyed by product id.
//! Adding an already-liked product is a no-op, so the no-duplicates
//! invariant is structural. Insertion order is preserved for rendering.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use daisy_client::{Storage, StorageError, keys};
use daisy_core::{Product, ProductId};

struct WishlistInner {
    storage: Storage,
    items: RwLock<Vec<Product>>,
}

/// Wishlist store handle.
///
/// Cheaply cloneable; all clones share the same list and storage.
#[derive(Clone)]
pub struct WishlistStore {
    inner: Arc<WishlistInner>,
}

impl WishlistStore {
    /// Construct the store, restoring any persisted snapshot.
    pub async fn restore(storage: Storage) -> Self {
        let items: Vec<Product> = storage.get_json(keys::WISHLIST).await.unwrap_or_default();
        if !items.is_empty() {
            debug!(liked = items.len(), "Restored wishlist snapshot");
        }

        Self {
            inner: Arc::new(WishlistInner {
                storage,
                items: RwLock::new(items),
            }),
        }
    }

    /// Add a product. Idempotent: a second add of the same product id
    /// leaves the list unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the snapshot fails.
    pub async fn add(&self, product: &Product) -> Result<(), StorageError> {
        let mut items = self.inner.items.write().await;
        if items.iter().any(|item| item.id == product.id) {
            return Ok(());
        }
        items.push(product.clone());
        self.persist(&items).await
    }

    /// Remove a product. Removing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the snapshot fails.
    pub async fn remove(&self, product_id: ProductId) -> Result<(), StorageError> {
        let mut items = self.inner.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != product_id);
        if items.len() == before {
            return Ok(());
        }
        self.persist(&items).await
    }

    /// Whether a product is currently liked. Pure query.
    pub async fn contains(&self, product_id: ProductId) -> bool {
        self.inner
            .items
            .read()
            .await
            .iter()
            .any(|item| item.id == product_id)
    }

    /// Empty the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the snapshot fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut items = self.inner.items.write().await;
        items.clear();
        self.persist(&items).await
    }

    /// Current liked products, in insertion order.
    pub async fn items(&self) -> Vec<Product> {
        self.inner.items.read().await.clone()
    }

    async fn persist(&self, items: &[Product]) -> Result<(), StorageError> {
        self.inner.storage.set_json(keys::WISHLIST, &items).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use daisy_core::Category;
    use rust_decimal::Decimal;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Piece {id}"),
            price: Decimal::from(100),
            original_price: None,
            images: vec![],
            category: Category::Necklaces,
            collection: "Garden Dreams".to_owned(),
            description: String::new(),
            details: vec![],
            materials: vec![],
            care_instructions: vec![],
            is_new: false,
            is_bestseller: false,
            rating: 4.5,
            reviews: 10,
            in_stock: true,
            colors: None,
            sizes: None,
        }
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let wishlist = WishlistStore::restore(Storage::memory()).await;
        let piece = product(1);

        wishlist.add(&piece).await.unwrap();
        wishlist.add(&piece).await.unwrap();

        assert_eq!(wishlist.items().await.len(), 1);
        assert!(wishlist.contains(piece.id).await);
    }

    #[tokio::test]
    async fn test_remove() {
        let wishlist = WishlistStore::restore(Storage::memory()).await;
        wishlist.add(&product(1)).await.unwrap();
        wishlist.add(&product(2)).await.unwrap();

        wishlist.remove(ProductId::new(1)).await.unwrap();
        assert!(!wishlist.contains(ProductId::new(1)).await);
        assert!(wishlist.contains(ProductId::new(2)).await);

        // Absent removal is a no-op
        wishlist.remove(ProductId::new(1)).await.unwrap();
        assert_eq!(wishlist.items().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let wishlist = WishlistStore::restore(Storage::memory()).await;
        wishlist.add(&product(1)).await.unwrap();
        wishlist.clear().await.unwrap();
        assert!(wishlist.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_restores_across_instances() {
        let storage = Storage::memory();
        {
            let wishlist = WishlistStore::restore(storage.clone()).await;
            wishlist.add(&product(3)).await.unwrap();
        }

        let wishlist = WishlistStore::restore(storage).await;
        assert!(wishlist.contains(ProductId::new(3)).await);
    }
}
