//! Cart Persistence Shim
//!
//! The cart survives page reloads through a single serialized snapshot per
//! session key: read once when the session first appears, overwritten after
//! every mutation. The engine behind the key is deliberately pluggable.

use async_trait::async_trait;
use dashmap::DashMap;
use std::path::PathBuf;

use crate::error::CartError;

use super::aggregate::Cart;

/// Key-value persistence for cart snapshots.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Loads the snapshot for a session key, `None` when nothing was saved.
    async fn load(&self, key: &str) -> Result<Option<Cart>, CartError>;

    /// Overwrites the snapshot for a session key.
    async fn save(&self, key: &str, cart: &Cart) -> Result<(), CartError>;

    /// Drops the snapshot (checkout or explicit reset).
    async fn remove(&self, key: &str) -> Result<(), CartError>;
}

// =============================================================================
// JSON file store
// =============================================================================

/// File-backed store: one JSON document per session key under a data
/// directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Session keys are UUIDs, but the path is still restricted to a safe
    /// alphabet so a hostile cookie cannot escape the data directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl CartStore for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<Cart>, CartError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                let cart = serde_json::from_str(&raw)
                    .map_err(|e| CartError::Storage(format!("corrupt snapshot {path:?}: {e}")))?;
                Ok(Some(cart))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CartError::Storage(format!("read {path:?}: {e}"))),
        }
    }

    async fn save(&self, key: &str, cart: &Cart) -> Result<(), CartError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CartError::Storage(format!("create {:?}: {e}", self.dir)))?;

        let path = self.path_for(key);
        let raw = serde_json::to_string(cart)
            .map_err(|e| CartError::Storage(format!("serialize cart: {e}")))?;
        tokio::fs::write(&path, raw)
            .await
            .map_err(|e| CartError::Storage(format!("write {path:?}: {e}")))
    }

    async fn remove(&self, key: &str) -> Result<(), CartError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CartError::Storage(format!("remove {path:?}: {e}"))),
        }
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Map-backed store used by tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryStore {
    carts: DashMap<String, Cart>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Cart>, CartError> {
        Ok(self.carts.get(key).map(|c| c.clone()))
    }

    async fn save(&self, key: &str, cart: &Cart) -> Result<(), CartError> {
        self.carts.insert(key.to_string(), cart.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CartError> {
        self.carts.remove(key);
        Ok(())
    }
}
