//! Shopping Cart Domain Module
//!
//! This module contains all cart business logic, including:
//! - The cart aggregate (line items, pricing, shipping eligibility)
//! - Domain models (CartLine, inputs, derived summaries)
//! - Session helpers and the persistence shim
//! - Application state management
//! - REST API handlers

pub mod aggregate;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;
pub mod storage;

// Re-export commonly used types for convenience
pub use aggregate::{Cart, ShippingPolicy};
pub use handlers::routes;
pub use state::{AppState, SharedState};
pub use storage::{CartStore, JsonFileStore, MemoryStore};
