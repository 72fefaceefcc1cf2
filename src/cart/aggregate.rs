//! Cart Aggregate
//!
//! Owns the insertion-ordered list of cart lines and derives everything the
//! storefront renders: item count, discount-adjusted subtotal, shipping
//! eligibility and the grand total. Mutations validate before touching
//! state, so a rejected command leaves the cart untouched.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CartError;

use super::models::CartLine;

/// Shipping configuration, injected rather than hard-coded so regional
/// storefronts can vary threshold and rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is free.
    pub free_threshold: Decimal,

    /// Flat rate charged below the threshold.
    pub flat_rate: Decimal,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: dec!(150),
            flat_rate: dec!(10),
        }
    }
}

/// The shopping cart: an ordered sequence of lines, one per
/// (product, variant) pair, insertion order preserved for stable display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds a validated line. If the (product, variant) pair is already
    /// present its quantity is increased; otherwise the line is appended.
    /// A merge that would overflow the quantity is rejected as
    /// `InvalidQuantity` before any state change.
    pub fn add_item(&mut self, line: CartLine) -> Result<(), CartError> {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&line.product_id, &line.variant_id))
        {
            existing.quantity = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or(CartError::InvalidQuantity)?;
        } else {
            self.lines.push(line);
        }
        Ok(())
    }

    /// Removes the matching line. Removing an absent pair is a no-op, not
    /// an error.
    pub fn remove_item(&mut self, product_id: &str, variant_id: &str) {
        self.lines.retain(|l| !l.matches(product_id, variant_id));
    }

    /// Sets the absolute quantity for a line. A quantity of 0 behaves like
    /// [`Cart::remove_item`] (no-op when absent); a positive quantity on a
    /// missing line is `LineNotFound`.
    pub fn set_quantity(
        &mut self,
        product_id: &str,
        variant_id: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove_item(product_id, variant_id);
            return Ok(());
        }

        match self
            .lines
            .iter_mut()
            .find(|l| l.matches(product_id, variant_id))
        {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CartError::LineNotFound {
                product_id: product_id.to_string(),
                variant_id: variant_id.to_string(),
            }),
        }
    }

    /// Total number of units across all lines. Widened so the sum cannot
    /// overflow even with every line at the per-line quantity ceiling.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Discount-adjusted subtotal in full precision. Rounding happens only
    /// at the presentation boundary.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Step function: 0 at or above the free threshold, the flat rate below.
    pub fn shipping_cost(&self, policy: &ShippingPolicy) -> Decimal {
        if self.subtotal() >= policy.free_threshold {
            Decimal::ZERO
        } else {
            policy.flat_rate
        }
    }

    pub fn grand_total(&self, policy: &ShippingPolicy) -> Decimal {
        self.subtotal() + self.shipping_cost(policy)
    }

    /// Empties the cart (successful checkout or explicit reset).
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
