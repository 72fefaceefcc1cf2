//! Monetary presentation helpers
//!
//! All cart and order arithmetic runs on full-precision [`Decimal`] values.
//! Rounding happens exactly once, at the presentation boundary, using
//! half-up (midpoint away from zero) to two decimal places. Nothing in the
//! aggregate rounds mid-computation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol used across the storefront.
pub const CURRENCY_SYMBOL: &str = "S/";

/// Rounds a full-precision amount to the two-decimal display scale.
///
/// This is the single rounding point in the crate.
pub fn round_display(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Formats an amount for display: `S/ 208.00`.
pub fn format_money(amount: Decimal) -> String {
    format!("{} {}", CURRENCY_SYMBOL, round_display(amount))
}
