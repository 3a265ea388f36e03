//! Monetary rounding and display helpers.
//!
//! # Invariants
//! - Every stored or computed amount passes through `round2` at the point it
//!   is produced; rounding is staged, never deferred to display.
//! - Rounding is half-away-from-zero.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Currency symbol prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "€";

/// Rounds an amount to 2 decimal places, half away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a float to the decimal it displays as (`12.345` -> `12.345`).
///
/// Returns `None` for NaN, infinities and magnitudes `Decimal` cannot hold.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// Formats an amount as currency symbol + fixed 2 decimals, e.g. `€12.50`.
pub fn format_currency(amount: Decimal) -> String {
    let mut fixed = round2(amount);
    fixed.rescale(2);
    format!("{CURRENCY_SYMBOL}{fixed}")
}
