//! Static fallback rates used when no live table is available.
//!
//! Values are approximate and only meant to keep totals in the right order of
//! magnitude while the rate API is unreachable. Quotes built from this table
//! are always flagged as fallback.

use justsplit_shared::CurrencyCode;
use rust_decimal::Decimal;

use super::exchange::{RateQuote, RateSource};

/// `(from, to, rate)`: 1 `from` = `rate` `to`.
const FALLBACK_RATES: &[(&str, &str, Decimal)] = &[
    ("USD", "EUR", Decimal::from_parts(92, 0, 0, false, 2)),
    ("USD", "GBP", Decimal::from_parts(79, 0, 0, false, 2)),
    ("USD", "JPY", Decimal::from_parts(150, 0, 0, false, 0)),
    ("USD", "CAD", Decimal::from_parts(136, 0, 0, false, 2)),
    ("USD", "AUD", Decimal::from_parts(152, 0, 0, false, 2)),
    ("USD", "CHF", Decimal::from_parts(88, 0, 0, false, 2)),
    ("USD", "CNY", Decimal::from_parts(72, 0, 0, false, 1)),
    ("USD", "INR", Decimal::from_parts(83, 0, 0, false, 0)),
    ("USD", "MXN", Decimal::from_parts(17, 0, 0, false, 0)),
    ("USD", "BRL", Decimal::from_parts(5, 0, 0, false, 0)),
    ("USD", "COP", Decimal::from_parts(3900, 0, 0, false, 0)),
    ("EUR", "GBP", Decimal::from_parts(86, 0, 0, false, 2)),
    ("EUR", "JPY", Decimal::from_parts(163, 0, 0, false, 0)),
    ("EUR", "MXN", Decimal::from_parts(185, 0, 0, false, 1)),
    ("EUR", "COP", Decimal::from_parts(4250, 0, 0, false, 0)),
    ("GBP", "JPY", Decimal::from_parts(190, 0, 0, false, 0)),
];

fn lookup(from: CurrencyCode, to: CurrencyCode) -> Option<Decimal> {
    FALLBACK_RATES
        .iter()
        .find(|(f, t, _)| *f == from.as_str() && *t == to.as_str())
        .map(|(_, _, rate)| *rate)
}

/// Looks up a static rate, trying the direct pair first and then the inverted
/// reverse pair.
///
/// Returns `None` when neither direction is in the table.
#[must_use]
pub fn fallback_rate(from: CurrencyCode, to: CurrencyCode) -> Option<RateQuote> {
    if let Some(rate) = lookup(from, to) {
        return Some(RateQuote::new(from, to, rate, RateSource::Fallback));
    }

    lookup(to, from)
        .and_then(|rate| Decimal::ONE.checked_div(rate))
        .map(|rate| RateQuote::new(from, to, rate, RateSource::FallbackInverse))
}
