//! Catalog passthrough
//!
//! The landing page lists product collections straight from the remote
//! catalog. This module only forwards the query; the catalog stays an
//! external data provider, never an owned component.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::cart::state::SharedState;
use crate::error::CartError;
use crate::upstream::Collection;

/// Query for `GET /collections`
#[derive(Debug, Deserialize)]
pub struct CollectionsQuery {
    /// When true, only collections flagged `activo` upstream are returned.
    #[serde(default)]
    pub activo: bool,
}

/// Creates routes for catalog-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/collections", get(list_collections))
}

/// Endpoint: GET /collections
/// Forwards the active-only filter to the upstream catalog. Fetch failure
/// surfaces as 502; no prior state is touched.
async fn list_collections(
    State(state): State<SharedState>,
    Query(query): Query<CollectionsQuery>,
) -> Result<Json<Vec<Collection>>, CartError> {
    let collections = state.api.fetch_collections(query.activo).await?;
    Ok(Json(collections))
}
