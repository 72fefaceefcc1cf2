//! Order Domain Module
//!
//! Read-only order snapshots and the display-only status resolver:
//! - Domain models (OrderStatus, PaymentMethod, OrderSnapshot)
//! - Status classification (label, tone, payment-instruction panel)
//! - The order view handler

pub mod handlers;
pub mod models;
pub mod status;

// Re-export commonly used types and functions
pub use handlers::routes;
pub use models::{OrderSnapshot, OrderStatus, PaymentKind, PaymentMethod, PaymentState};
pub use status::{resolve_payment_instructions, resolve_status, StatusDisplay, Tone};
