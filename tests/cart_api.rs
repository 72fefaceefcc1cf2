//! Integration tests for the storefront cart API
//!
//! These tests exercise the HTTP facade end to end:
//! - Session handling via the cart cookie
//! - Add / update / remove semantics, including merge-on-add
//! - Pricing: discounts, the free-shipping step, grand totals
//! - Checkout and snapshot persistence
//! - Error mapping for invalid payloads and upstream failures

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use storefront_core::cart::{AppState, MemoryStore, ShippingPolicy};
use storefront_core::router::create_app_router;
use storefront_core::upstream::ApiClient;

/// Helper to build a test app over an in-memory store. The upstream base
/// URL points at a port nothing listens on, so order fetches fail fast.
fn create_test_app(store: Arc<MemoryStore>) -> axum::Router {
    let api = ApiClient::new("http://127.0.0.1:1");
    let state = Arc::new(AppState::new(store, ShippingPolicy::default(), api));
    create_app_router(state)
}

/// Helper to send a JSON request pinned to a session cookie.
async fn send_request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    session: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("cookie", format!("cart_session={session}"));

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&value).unwrap()))
            .unwrap(),
        None => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::empty()).unwrap()
        }
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

fn add_item_body(product: &str, variant: &str, price: &str, qty: u32) -> Value {
    json!({
        "productId": product,
        "variantId": variant,
        "name": format!("{product} {variant}"),
        "unitPrice": price,
        "quantity": qty
    })
}

#[tokio::test]
async fn empty_cart_summary_and_fresh_cookie() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    // No cookie at all: the response must mint one.
    let request = Request::builder()
        .method("GET")
        .uri("/cart")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("new session sets a cookie")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("cart_session="));

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["count"], 0);
    assert_eq!(body["subtotalDisplay"], "S/ 0.00");
}

#[tokio::test]
async fn reference_pricing_scenario() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    // productA/variantX: 2 x 50, no discount
    let (status, _) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("productA", "variantX", "50", 2)),
        "s1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // productB/variantY: 1 x 120 with a 10% active discount
    let (status, body) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({
            "productId": "productB",
            "variantId": "variantY",
            "name": "productB variantY",
            "unitPrice": "120",
            "discount": { "percent": "10", "active": true },
            "quantity": 1
        })),
        "s1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["count"], 3);
    assert_eq!(body["subtotalDisplay"], "S/ 208.00");
    assert_eq!(body["shippingDisplay"], "S/ 0.00");
    assert_eq!(body["grandTotalDisplay"], "S/ 208.00");
    assert_eq!(body["lines"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn adding_the_same_pair_aggregates_quantity() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    for qty in [2, 3] {
        let (status, _) = send_request(
            &app,
            "POST",
            "/cart/items",
            Some(add_item_body("p1", "v1", "10", qty)),
            "s2",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send_request(&app, "GET", "/cart", None, "s2").await;
    let lines = body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1, "same pair must not duplicate");
    assert_eq!(lines[0]["quantity"], 5);
}

#[tokio::test]
async fn shipping_steps_at_the_free_threshold() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    let (_, below) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("p1", "v1", "149.99", 1)),
        "s3",
    )
    .await;
    assert_eq!(below["shippingDisplay"], "S/ 10.00");
    assert_eq!(below["grandTotalDisplay"], "S/ 159.99");

    let (_, at) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("p2", "v1", "0.01", 1)),
        "s3",
    )
    .await;
    assert_eq!(at["shippingDisplay"], "S/ 0.00");
    assert_eq!(at["grandTotalDisplay"], "S/ 150.00");
}

#[tokio::test]
async fn quantity_update_and_removal_semantics() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("p1", "v1", "25", 2)),
        "s4",
    )
    .await;

    // Raise the quantity.
    let (status, body) = send_request(
        &app,
        "PUT",
        "/cart/items",
        Some(json!({ "productId": "p1", "variantId": "v1", "quantity": 4 })),
        "s4",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);

    // Quantity 0 removes the line.
    let (status, body) = send_request(
        &app,
        "PUT",
        "/cart/items",
        Some(json!({ "productId": "p1", "variantId": "v1", "quantity": 0 })),
        "s4",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    // Positive quantity on a missing line is 404.
    let (status, _) = send_request(
        &app,
        "PUT",
        "/cart/items",
        Some(json!({ "productId": "p1", "variantId": "v1", "quantity": 2 })),
        "s4",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Removing an absent pair stays a no-op.
    let (status, body) = send_request(
        &app,
        "DELETE",
        "/cart/items",
        Some(json!({ "productId": "p9", "variantId": "v9" })),
        "s4",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn invalid_payloads_are_rejected_before_any_change() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    // Negative price fails boundary validation.
    let (status, body) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("p1", "v1", "-5", 1)),
        "s5",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("invalid product data"));

    // Zero quantity on add is InvalidQuantity.
    let (status, _) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("p1", "v1", "5", 0)),
        "s5",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Out-of-range discount percent.
    let (status, _) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({
            "productId": "p1",
            "variantId": "v1",
            "name": "x",
            "unitPrice": "10",
            "discount": { "percent": "140", "active": true }
        })),
        "s5",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // The cart is still empty: nothing half-applied.
    let (_, body) = send_request(&app, "GET", "/cart", None, "s5").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn merging_past_the_quantity_ceiling_is_rejected() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    let (status, _) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("p1", "v1", "10", u32::MAX)),
        "s10",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // One more unit would overflow the line quantity.
    let (status, body) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("p1", "v1", "10", 1)),
        "s10",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("positive integer"));

    // The rejected merge changed nothing.
    let (_, body) = send_request(&app, "GET", "/cart", None, "s10").await;
    assert_eq!(body["count"], u64::from(u32::MAX));
    assert_eq!(body["lines"][0]["quantity"], u64::from(u32::MAX));
}

#[tokio::test]
async fn probing_unknown_sessions_leaves_no_live_entries() {
    let store = Arc::new(MemoryStore::new());
    let api = ApiClient::new("http://127.0.0.1:1");
    let state = Arc::new(AppState::new(store, ShippingPolicy::default(), api));
    let app = create_app_router(state.clone());

    // Removal on a session that never had a cart: no-op.
    let (status, body) = send_request(
        &app,
        "DELETE",
        "/cart/items",
        Some(json!({ "productId": "p1", "variantId": "v1" })),
        "ghost1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    // Quantity 0 mirrors removal.
    let (status, _) = send_request(
        &app,
        "PUT",
        "/cart/items",
        Some(json!({ "productId": "p1", "variantId": "v1", "quantity": 0 })),
        "ghost2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A positive quantity still reports the missing line.
    let (status, _) = send_request(
        &app,
        "PUT",
        "/cart/items",
        Some(json!({ "productId": "p1", "variantId": "v1", "quantity": 3 })),
        "ghost3",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // None of those sessions got a cart entry.
    assert!(state.carts.is_empty());
}

#[tokio::test]
async fn cart_snapshot_survives_a_new_app_instance() {
    let store = Arc::new(MemoryStore::new());

    let first = create_test_app(store.clone());
    send_request(
        &first,
        "POST",
        "/cart/items",
        Some(add_item_body("p1", "v1", "59.90", 2)),
        "s6",
    )
    .await;

    // Fresh state over the same store: the session hydrates from the
    // persisted snapshot.
    let second = create_test_app(store);
    let (_, body) = send_request(&second, "GET", "/cart", None, "s6").await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["lines"][0]["productId"], "p1");
}

#[tokio::test]
async fn checkout_clears_cart_and_snapshot() {
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store.clone());

    send_request(
        &app,
        "POST",
        "/cart/items",
        Some(add_item_body("p1", "v1", "80", 2)),
        "s7",
    )
    .await;

    let (status, body) = send_request(&app, "POST", "/cart/checkout", None, "s7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "checked_out");
    assert!(body["receipt"].as_str().unwrap().starts_with("2x"));

    // Both the live cart and the persisted snapshot are gone.
    let (_, body) = send_request(&app, "GET", "/cart", None, "s7").await;
    assert_eq!(body["count"], 0);

    let fresh = create_test_app(store);
    let (_, body) = send_request(&fresh, "GET", "/cart", None, "s7").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn unreachable_order_service_surfaces_as_bad_gateway() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    let (status, body) = send_request(&app, "GET", "/orders/ord-1", None, "s8").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("upstream fetch failed"));
}

#[tokio::test]
async fn unreachable_catalog_surfaces_as_bad_gateway() {
    let app = create_test_app(Arc::new(MemoryStore::new()));

    let (status, body) = send_request(&app, "GET", "/collections?activo=true", None, "s9").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("upstream fetch failed"));
}
