//! Storefront Core Library
//!
//! This library provides the storefront's cart pricing model and the
//! order-status presentation model, served behind a small HTTP facade.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod order;

// Shared concerns
pub mod error;
pub mod money;
pub mod upstream;

// Infrastructure
pub mod router;
