//! Exchange rate types and logic.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::{DateTime, Utc};
use justsplit_shared::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a quoted rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Same currency on both sides; the rate is exactly 1.
    Identity,
    /// A fresh table already held in memory.
    Cache,
    /// A table fetched from the rate API for this request.
    Remote,
    /// Direct entry of the static fallback table.
    Fallback,
    /// Inverted entry of the static fallback table.
    FallbackInverse,
    /// No rate known anywhere; 1 is assumed.
    Default,
}

impl RateSource {
    /// Returns true for rates that did not come from a live table.
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback | Self::FallbackInverse | Self::Default)
    }
}

/// Exchange rate between two currencies (1 `from` = `rate` `to`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    /// Source currency code.
    pub from: CurrencyCode,
    /// Target currency code.
    pub to: CurrencyCode,
    /// Exchange rate.
    pub rate: Decimal,
    /// True when the rate is not live and should be disclosed as approximate.
    pub is_fallback: bool,
    /// How the rate was obtained.
    pub source: RateSource,
}

impl RateQuote {
    /// Creates a quote; `is_fallback` is derived from the source.
    #[must_use]
    pub const fn new(from: CurrencyCode, to: CurrencyCode, rate: Decimal, source: RateSource) -> Self {
        Self {
            from,
            to,
            rate,
            is_fallback: source.is_fallback(),
            source,
        }
    }

    /// The identity quote for a currency against itself.
    #[must_use]
    pub const fn identity(currency: CurrencyCode) -> Self {
        Self::new(currency, currency, Decimal::ONE, RateSource::Identity)
    }
}

/// Full table of rates for one base currency, as returned by the rate API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Base currency; every rate is "1 base = rate target".
    pub base: CurrencyCode,
    /// Rates keyed by target currency.
    pub rates: HashMap<CurrencyCode, Decimal>,
    /// When the table was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Creates a table stamped with the current time.
    #[must_use]
    pub fn new(base: CurrencyCode, rates: HashMap<CurrencyCode, Decimal>) -> Self {
        Self {
            base,
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// Returns the rate from the base to `to`, if quoted.
    #[must_use]
    pub fn rate_for(&self, to: CurrencyCode) -> Option<Decimal> {
        if to == self.base {
            return Some(Decimal::ONE);
        }
        self.rates.get(&to).copied()
    }

    /// Returns true if the table is younger than `ttl` at `now`.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return true;
        };
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

/// Persisted form of the rate cache.
///
/// Serialized as `{"exchange_rates": {"USD": {...}, ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCacheSnapshot {
    /// Cached tables keyed by base currency.
    pub exchange_rates: BTreeMap<CurrencyCode, RateTable>,
}

impl RateCacheSnapshot {
    /// Builds a snapshot from a set of tables.
    #[must_use]
    pub fn from_tables(tables: impl IntoIterator<Item = RateTable>) -> Self {
        Self {
            exchange_rates: tables.into_iter().map(|t| (t.base, t)).collect(),
        }
    }

    /// Returns true if the snapshot holds no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchange_rates.is_empty()
    }
}
