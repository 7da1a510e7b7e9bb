//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Converted amounts stay unrounded while they are accumulated
//! - Round once, on the final figure shown or settled
//! - Final figures use 2 decimal places, midpoints away from zero

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places of every settled or displayed amount.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Converts an amount using the given exchange rate, without rounding.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

/// Rounds a final amount to cents.
///
/// Midpoints round away from zero, so 0.125 becomes 0.13 and -0.125 becomes -0.13.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
