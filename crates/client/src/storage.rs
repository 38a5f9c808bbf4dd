//! Durable key-value storage.
//!
//! The browser `localStorage` analog: a string-to-string map that survives
//! process restarts. Session identities, tokens, and the cart and wishlist
//! snapshots all live here under the well-known [`keys`].
//!
//! Two backends exist: an in-memory map (tests construct a fresh one per
//! case) and a file-backed map persisted as a JSON object. Writes await a
//! `tokio::fs` flush of the whole snapshot; nothing ever blocks a thread on
//! disk I/O. All writes funnel through one `RwLock`, so the
//! single-writer-per-key discipline holds without any per-key machinery.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::warn;

/// Well-known storage keys.
pub mod keys {
    /// Serialized customer identity.
    pub const USER: &str = "daisy-user";
    /// Customer bearer token (opaque string).
    pub const TOKEN: &str = "daisy-token";
    /// Serialized admin identity.
    pub const ADMIN_USER: &str = "admin-user";
    /// Admin bearer token (opaque string).
    pub const ADMIN_TOKEN: &str = "admin-token";
    /// Serialized wishlist snapshot.
    pub const WISHLIST: &str = "daisy-wishlist";
    /// Serialized cart snapshot.
    pub const CART: &str = "daisy-cart";
}

/// Errors that can occur while reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

enum Backend {
    Memory,
    File(PathBuf),
}

struct StorageInner {
    backend: Backend,
    map: RwLock<HashMap<String, String>>,
}

/// Durable key-value store handle.
///
/// Cheaply cloneable; all clones share the same map and backend.
#[derive(Clone)]
pub struct Storage {
    inner: Arc<StorageInner>,
}

impl Storage {
    /// Create an in-memory store that forgets everything on drop.
    ///
    /// Intended for tests and ephemeral sessions.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            inner: Arc::new(StorageInner {
                backend: Backend::Memory,
                map: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Open a file-backed store, loading the existing snapshot if present.
    ///
    /// A missing file starts empty; a corrupt file is treated as empty and
    /// logged, never fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let map = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt storage snapshot, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Io(e)),
        };

        Ok(Self {
            inner: Arc::new(StorageInner {
                backend: Backend::File(path),
                map: RwLock::new(map),
            }),
        })
    }

    /// Read a raw value.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.map.read().await.get(key).cloned()
    }

    /// Read a JSON-serialized value.
    ///
    /// A value that fails to deserialize is treated as absent (and logged);
    /// stale snapshots must never poison a fresh session.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable storage value");
                None
            }
        }
    }

    /// Write a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot flush fails.
    pub async fn set(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut map = self.inner.map.write().await;
        map.insert(key.to_owned(), value.into());
        self.flush(&map).await
    }

    /// Write a value as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the snapshot flush fails.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, raw).await
    }

    /// Remove a key. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot flush fails.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.inner.map.write().await;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&map).await
    }

    /// Whether a key currently holds a value.
    pub async fn contains(&self, key: &str) -> bool {
        self.inner.map.read().await.contains_key(key)
    }

    /// Persist the whole snapshot. Held under the write lock so file writes
    /// apply in mutation order.
    async fn flush(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        match &self.inner.backend {
            Backend::Memory => Ok(()),
            Backend::File(path) => {
                let contents = serde_json::to_string_pretty(map)?;
                tokio::fs::write(path, contents).await?;
                Ok(())
            }
        }
    }
}
