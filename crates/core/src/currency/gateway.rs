//! Caching exchange rate gateway.
//!
//! Lookup order for `from -> to`:
//! 1. Same currency: rate 1, no lookup
//! 2. Fresh cached table for `from` that quotes `to`
//! 3. Table fetched from the rate provider (cached and persisted on success)
//! 4. Static fallback table, direct then inverse
//! 5. Parity (rate 1), flagged as fallback
//!
//! Steps 4 and 5 absorb every provider failure, so rate lookups never fail.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use justsplit_shared::CurrencyCode;
use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::conversion::convert_amount;
use super::error::FxError;
use super::exchange::{RateCacheSnapshot, RateQuote, RateSource, RateTable};
use super::fallback::fallback_rate;

/// Default time-to-live of a fetched table (6 hours).
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Default number of base currencies kept in memory.
const DEFAULT_CACHE_CAPACITY: u64 = 64;

/// Source of live rate tables.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches every rate quoted against `base`.
    async fn fetch_rates(&self, base: CurrencyCode) -> Result<RateTable, FxError>;
}

/// Durable home of the rate cache between restarts.
#[async_trait]
pub trait RateSnapshotStore: Send + Sync {
    /// Loads the last saved snapshot, or `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<RateCacheSnapshot>, FxError>;

    /// Replaces the saved snapshot.
    async fn save(&self, snapshot: &RateCacheSnapshot) -> Result<(), FxError>;
}

/// Result of converting an amount between currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Converted amount, unrounded.
    pub amount: Decimal,
    /// Quote used for the conversion.
    pub quote: RateQuote,
}

/// Exchange rate gateway with an in-memory cache per base currency.
///
/// Thread-safe; share it behind an `Arc`.
pub struct ExchangeGateway {
    provider: Arc<dyn RateProvider>,
    store: Option<Arc<dyn RateSnapshotStore>>,
    cache: Cache<CurrencyCode, Arc<RateTable>>,
    ttl: Duration,
}

impl ExchangeGateway {
    /// Creates a gateway with default settings (64 bases, 6 hour TTL) and no
    /// snapshot store.
    #[must_use]
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self::with_config(provider, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL)
    }

    /// Creates a gateway with custom cache capacity and TTL.
    #[must_use]
    pub fn with_config(provider: Arc<dyn RateProvider>, max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self {
            provider,
            store: None,
            cache,
            ttl,
        }
    }

    /// Attaches a snapshot store; successful fetches are persisted to it.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn RateSnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Seeds the cache from the snapshot store.
    ///
    /// Tables older than the TTL are skipped. Returns the number of tables
    /// restored.
    pub async fn restore(&self) -> Result<usize, FxError> {
        let Some(store) = &self.store else {
            return Ok(0);
        };
        let snapshot = match store.load().await? {
            Some(snapshot) if !snapshot.is_empty() => snapshot,
            _ => {
                debug!("No exchange rate snapshot to restore");
                return Ok(0);
            }
        };

        let now = Utc::now();
        let mut restored = 0;
        for (base, table) in snapshot.exchange_rates {
            if table.is_fresh(self.ttl, now) {
                self.cache.insert(base, Arc::new(table)).await;
                restored += 1;
            } else {
                debug!(base = %base, fetched_at = %table.fetched_at, "Skipping stale snapshot table");
            }
        }

        info!(restored, "Restored exchange rate cache");
        Ok(restored)
    }

    /// Returns the rate for `from -> to`.
    ///
    /// Never fails: provider errors and unknown pairs yield a quote with
    /// `is_fallback` set.
    pub async fn get_exchange_rate(&self, from: CurrencyCode, to: CurrencyCode) -> RateQuote {
        if from == to {
            return RateQuote::identity(from);
        }

        if let Some(rate) = self
            .fresh_table(from)
            .await
            .and_then(|table| table.rate_for(to))
        {
            debug!(%from, %to, %rate, "Exchange rate served from cache");
            return RateQuote::new(from, to, rate, RateSource::Cache);
        }

        match self.provider.fetch_rates(from).await {
            Ok(table) => {
                let rate = table.rate_for(to);
                self.cache.insert(from, Arc::new(table)).await;
                self.persist().await;

                if let Some(rate) = rate {
                    debug!(%from, %to, %rate, "Exchange rate fetched");
                    return RateQuote::new(from, to, rate, RateSource::Remote);
                }
                warn!(%from, %to, "Rate API does not quote currency pair, using fallback");
            }
            Err(e) => {
                warn!(error = %e, %from, %to, "Failed to fetch exchange rates, using fallback");
            }
        }

        Self::fallback(from, to)
    }

    /// Converts `amount` from one currency to another without rounding.
    pub async fn convert(&self, amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Conversion {
        let quote = self.get_exchange_rate(from, to).await;
        Conversion {
            amount: convert_amount(amount, quote.rate),
            quote,
        }
    }

    /// Returns a snapshot of every table currently cached.
    #[must_use]
    pub fn snapshot(&self) -> RateCacheSnapshot {
        RateCacheSnapshot::from_tables(self.cache.iter().map(|(_, table)| (*table).clone()))
    }

    fn fallback(from: CurrencyCode, to: CurrencyCode) -> RateQuote {
        fallback_rate(from, to).unwrap_or_else(|| {
            warn!(%from, %to, "No fallback rate for currency pair, assuming parity");
            RateQuote::new(from, to, Decimal::ONE, RateSource::Default)
        })
    }

    async fn fresh_table(&self, base: CurrencyCode) -> Option<Arc<RateTable>> {
        let table = self.cache.get(&base).await?;
        if table.is_fresh(self.ttl, Utc::now()) {
            Some(table)
        } else {
            self.cache.invalidate(&base).await;
            None
        }
    }

    async fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let snapshot = self.snapshot();
        if let Err(e) = store.save(&snapshot).await {
            warn!(error = %e, "Failed to persist exchange rate cache");
        }
    }
}
