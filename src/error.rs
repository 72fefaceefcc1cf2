//! Error taxonomy for the storefront core
//!
//! Every fallible operation in the crate reports one of the variants below.
//! Validation errors are raised *before* any state change, so a rejected
//! mutation leaves the cart exactly as it was.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Unified error type for cart mutations, order resolution, persistence and
/// upstream fetches.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Quantities on incoming cart mutations must be positive integers.
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    /// Product data entering the cart failed boundary validation
    /// (negative price, discount percent outside 0..=100). The cart never
    /// clamps invalid data silently.
    #[error("invalid product data: {0}")]
    InvalidProductData(String),

    /// A quantity update referenced a (product, variant) pair that is not
    /// in the cart.
    #[error("no cart line for product {product_id}, variant {variant_id}")]
    LineNotFound {
        product_id: String,
        variant_id: String,
    },

    /// An order carried a status outside the known enumeration. Callers
    /// rendering a status recover from this with the "Procesando" fallback.
    #[error("unknown order status `{0}`")]
    UnknownStatus(String),

    /// The external product/order API could not be reached or answered with
    /// an error. Surfaced to the caller; never retried here.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(#[from] reqwest::Error),

    /// The persisted cart snapshot could not be read or written.
    #[error("cart storage failure: {0}")]
    Storage(String),
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let status = match &self {
            CartError::InvalidQuantity
            | CartError::InvalidProductData(_)
            | CartError::UnknownStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CartError::LineNotFound { .. } => StatusCode::NOT_FOUND,
            CartError::UpstreamFetch(_) => StatusCode::BAD_GATEWAY,
            CartError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
