//! Application State
//!
//! Live carts are held in a [`DashMap`] keyed by session id; the persistence
//! shim behind it keeps one snapshot per session so a cart survives a page
//! reload. Everything the handlers need (shipping policy, upstream client)
//! is injected here instead of read from ambient globals.

use dashmap::DashMap;
use std::sync::Arc;

use crate::error::CartError;
use crate::upstream::ApiClient;

use super::aggregate::{Cart, ShippingPolicy};
use super::storage::CartStore;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state for the storefront backend.
pub struct AppState {
    /// Live carts, keyed by session id. DashMap shards sessions; within one
    /// session the UI issues at most one mutation at a time.
    pub carts: DashMap<String, Cart>,

    /// Durable snapshot store behind the live map.
    pub store: Arc<dyn CartStore>,

    /// Regional shipping configuration.
    pub shipping: ShippingPolicy,

    /// Client for the external product/order API.
    pub api: ApiClient,
}

impl AppState {
    pub fn new(store: Arc<dyn CartStore>, shipping: ShippingPolicy, api: ApiClient) -> Self {
        Self {
            carts: DashMap::new(),
            store,
            shipping,
            api,
        }
    }

    /// Restores a persisted snapshot into the live map the first time a
    /// session shows up. Subsequent calls are cheap no-ops.
    pub async fn hydrate_session(&self, session_id: &str) -> Result<(), CartError> {
        if self.carts.contains_key(session_id) {
            return Ok(());
        }
        if let Some(cart) = self.store.load(session_id).await? {
            tracing::debug!(session = session_id, "restored cart snapshot");
            self.carts.insert(session_id.to_string(), cart);
        }
        Ok(())
    }
}
