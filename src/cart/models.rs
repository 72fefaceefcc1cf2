//! Cart Domain Models
//!
//! This module contains the cart line item, its discount, and the JSON
//! shapes exchanged with the storefront frontend.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::money::{format_money, round_display};

use super::aggregate::{Cart, ShippingPolicy};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for cart mutations
fn default_quantity() -> u32 {
    1
}

/// Per-line percentage discount, as delivered by the product API.
///
/// The backend sometimes ships the discount object with `active: false`
/// instead of omitting it, so the flag is modelled explicitly rather than
/// inferred from presence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    /// Percentage in 0..=100.
    pub percent: Decimal,

    /// Whether the discount currently applies.
    pub active: bool,
}

/// One (product, variant) selection with a quantity.
///
/// Identity is the `(product_id, variant_id)` pair; the cart never holds
/// two lines with the same pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub variant_id: String,

    /// Product name, kept for receipts and summaries.
    pub name: String,

    /// Base unit price before any discount.
    pub unit_price: Decimal,

    /// Optional discount; ignored when inactive.
    pub discount: Option<Discount>,

    /// Always >= 1; a line that would drop to 0 is removed instead.
    pub quantity: u32,
}

impl CartLine {
    /// Validates external product data at the ingestion boundary and builds
    /// a line. Invalid data is rejected, never clamped.
    pub fn new(
        product_id: impl Into<String>,
        variant_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        discount: Option<Discount>,
        quantity: u32,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if unit_price < Decimal::ZERO {
            return Err(CartError::InvalidProductData(format!(
                "negative unit price {unit_price}"
            )));
        }
        if let Some(d) = &discount {
            if d.percent < Decimal::ZERO || d.percent > dec!(100) {
                return Err(CartError::InvalidProductData(format!(
                    "discount percent {} outside 0..=100",
                    d.percent
                )));
            }
        }

        Ok(Self {
            product_id: product_id.into(),
            variant_id: variant_id.into(),
            name: name.into(),
            unit_price,
            discount,
            quantity,
        })
    }

    /// Unit price with an active discount applied, in full precision.
    pub fn effective_unit_price(&self) -> Decimal {
        match &self.discount {
            Some(d) if d.active => self.unit_price * (Decimal::ONE - d.percent / dec!(100)),
            _ => self.unit_price,
        }
    }

    /// Full-precision line total.
    pub fn line_total(&self) -> Decimal {
        self.effective_unit_price() * Decimal::from(self.quantity)
    }

    /// Whether this line answers to the given identity pair.
    pub fn matches(&self, product_id: &str, variant_id: &str) -> bool {
        self.product_id == product_id && self.variant_id == variant_id
    }
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Input for `POST /cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product_id: String,
    pub variant_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub discount: Option<Discount>,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl AddItemInput {
    /// Runs boundary validation and converts into a cart line.
    pub fn into_line(self) -> Result<CartLine, CartError> {
        CartLine::new(
            self.product_id,
            self.variant_id,
            self.name,
            self.unit_price,
            self.discount,
            self.quantity,
        )
    }
}

/// Input for `DELETE /cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemInput {
    pub product_id: String,
    pub variant_id: String,
}

/// Input for `PUT /cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityInput {
    pub product_id: String,
    pub variant_id: String,

    /// New absolute quantity; 0 removes the line.
    pub quantity: u32,
}

// =============================================================================
// Response Payloads
// =============================================================================

/// One line as rendered back to the frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub product_id: String,
    pub variant_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub effective_unit_price: Decimal,
    pub line_total: Decimal,
    pub line_total_display: String,
}

/// Derived cart state returned by every cart endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart_id: String,
    pub lines: Vec<LineView>,
    pub count: u64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub grand_total: Decimal,
    pub subtotal_display: String,
    pub shipping_display: String,
    pub grand_total_display: String,
}

impl CartSummary {
    /// Derives the full summary for a cart under the given shipping policy.
    /// Raw amounts are rounded to display scale here, at the boundary.
    pub fn build(cart_id: &str, cart: &Cart, policy: &ShippingPolicy) -> Self {
        let subtotal = cart.subtotal();
        let shipping = cart.shipping_cost(policy);
        let grand_total = cart.grand_total(policy);

        let lines = cart
            .lines()
            .iter()
            .map(|line| LineView {
                product_id: line.product_id.clone(),
                variant_id: line.variant_id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                effective_unit_price: round_display(line.effective_unit_price()),
                line_total: round_display(line.line_total()),
                line_total_display: format_money(line.line_total()),
            })
            .collect();

        Self {
            cart_id: cart_id.to_string(),
            lines,
            count: cart.item_count(),
            subtotal: round_display(subtotal),
            shipping: round_display(shipping),
            grand_total: round_display(grand_total),
            subtotal_display: format_money(subtotal),
            shipping_display: format_money(shipping),
            grand_total_display: format_money(grand_total),
        }
    }
}

/// Response for checkout and reset operations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub status: String,
    pub cart_id: String,
    pub receipt: String,
}
