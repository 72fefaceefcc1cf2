//! External API Client
//!
//! Read-only access to the remote storefront API: collections for the
//! landing page and order snapshots for the post-purchase view. Failures
//! surface as [`CartError::UpstreamFetch`] and are never retried here;
//! retry policy, if any, belongs to the transport.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::order::models::OrderSnapshot;

/// A product collection as served by the catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub id: String,
    pub nombre: String,
    pub descripcion: String,
    pub imagen: String,
    pub destacado: bool,
}

/// Thin client over the remote storefront API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches collections, optionally filtered to active ones
    /// (`?activo=true`).
    pub async fn fetch_collections(&self, only_active: bool) -> Result<Vec<Collection>, CartError> {
        let mut request = self.http.get(format!("{}/colecciones", self.base_url));
        if only_active {
            request = request.query(&[("activo", "true")]);
        }

        let collections = request
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Collection>>()
            .await?;
        Ok(collections)
    }

    /// Fetches one order snapshot by id, attaching the bearer token when an
    /// authenticated session exists.
    pub async fn fetch_order(
        &self,
        id: &str,
        bearer: Option<&str>,
    ) -> Result<OrderSnapshot, CartError> {
        let mut request = self.http.get(format!("{}/pedidos/{id}", self.base_url));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let order = request
            .send()
            .await?
            .error_for_status()?
            .json::<OrderSnapshot>()
            .await?;
        Ok(order)
    }
}
