use std::net::SocketAddr;
use std::sync::Arc;

use storefront_core::cart::{AppState, JsonFileStore, ShippingPolicy};
use storefront_core::router::create_app_router;
use storefront_core::upstream::ApiClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Wire up state from the environment, with local-dev defaults
    let data_dir =
        std::env::var("STOREFRONT_DATA_DIR").unwrap_or_else(|_| "data/carts".to_string());
    let api_url = std::env::var("STOREFRONT_API_URL")
        .unwrap_or_else(|_| "http://localhost:4000/api".to_string());

    let store = Arc::new(JsonFileStore::new(data_dir));
    let api = ApiClient::new(api_url);
    let state = Arc::new(AppState::new(store, ShippingPolicy::default(), api));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("Server running on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
