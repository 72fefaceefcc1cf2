//! REST API handlers for cart operations
//!
//! Every mutation follows the same shape: resolve the session, validate the
//! command, apply it to the live cart, persist the snapshot, and reply with
//! the derived summary. Validation failures reject the request before any
//! state change.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum::http::HeaderMap;

use crate::error::CartError;

use super::aggregate::Cart;
use super::helpers::{format_line_summary, resolve_session_id, with_session_cookie};
use super::models::{
    AddItemInput, CartSummary, CheckoutResponse, RemoveItemInput, SetQuantityInput,
};
use super::state::SharedState;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart))
        .route(
            "/cart/items",
            post(add_item).put(set_quantity).delete(remove_item),
        )
        .route("/cart/checkout", post(checkout))
}

/// Endpoint: GET /cart
/// Returns the derived summary for the session's cart.
async fn get_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Response, CartError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    state.hydrate_session(&session_id).await?;

    let cart = state
        .carts
        .get(&session_id)
        .map(|c| c.clone())
        .unwrap_or_default();

    let summary = CartSummary::build(&session_id, &cart, &state.shipping);
    Ok(with_session_cookie(
        Json(summary).into_response(),
        &session_id,
        is_new,
    ))
}

/// Endpoint: POST /cart/items
/// Adds an item; an already-present (product, variant) pair aggregates
/// quantity instead of duplicating the line.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> Result<Response, CartError> {
    let (session_id, is_new) = resolve_session_id(&headers);

    // Boundary validation happens before the cart is touched.
    let line = payload.into_line()?;

    state.hydrate_session(&session_id).await?;
    let snapshot = {
        let mut cart = state.carts.entry(session_id.clone()).or_default();
        cart.add_item(line)?;
        cart.clone()
    };
    state.store.save(&session_id, &snapshot).await?;

    let summary = CartSummary::build(&session_id, &snapshot, &state.shipping);
    Ok(with_session_cookie(
        Json(summary).into_response(),
        &session_id,
        is_new,
    ))
}

/// Endpoint: PUT /cart/items
/// Sets an absolute quantity; 0 removes the line.
async fn set_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<SetQuantityInput>,
) -> Result<Response, CartError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    state.hydrate_session(&session_id).await?;

    // A session that never had a cart gets no live entry: quantity 0
    // mirrors remove_item's no-op, anything else is LineNotFound.
    let snapshot = match state.carts.get_mut(&session_id) {
        Some(mut cart) => {
            cart.set_quantity(&payload.product_id, &payload.variant_id, payload.quantity)?;
            Some(cart.clone())
        }
        None if payload.quantity == 0 => None,
        None => {
            return Err(CartError::LineNotFound {
                product_id: payload.product_id,
                variant_id: payload.variant_id,
            })
        }
    };
    if let Some(cart) = &snapshot {
        state.store.save(&session_id, cart).await?;
    }

    let summary = CartSummary::build(&session_id, &snapshot.unwrap_or_default(), &state.shipping);
    Ok(with_session_cookie(
        Json(summary).into_response(),
        &session_id,
        is_new,
    ))
}

/// Endpoint: DELETE /cart/items
/// Removes a line; an absent pair is a no-op, not an error.
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<RemoveItemInput>,
) -> Result<Response, CartError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    state.hydrate_session(&session_id).await?;

    // No live entry is inserted for a session that never had a cart.
    let snapshot = state.carts.get_mut(&session_id).map(|mut cart| {
        cart.remove_item(&payload.product_id, &payload.variant_id);
        cart.clone()
    });
    if let Some(cart) = &snapshot {
        state.store.save(&session_id, cart).await?;
    }

    let summary = CartSummary::build(&session_id, &snapshot.unwrap_or_default(), &state.shipping);
    Ok(with_session_cookie(
        Json(summary).into_response(),
        &session_id,
        is_new,
    ))
}

/// Endpoint: POST /cart/checkout
/// Clears the live cart and its persisted snapshot, returning a receipt
/// line. Order creation itself belongs to the external order service.
async fn checkout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Response, CartError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    state.hydrate_session(&session_id).await?;

    let cleared: Cart = state
        .carts
        .remove(&session_id)
        .map(|(_, cart)| cart)
        .unwrap_or_default();
    state.store.remove(&session_id).await?;

    let receipt = format_line_summary(&cleared);
    tracing::info!(session = %session_id, %receipt, "checkout");

    let response = CheckoutResponse {
        status: "checked_out".to_string(),
        cart_id: session_id.clone(),
        receipt,
    };
    Ok(with_session_cookie(
        Json(response).into_response(),
        &session_id,
        is_new,
    ))
}
