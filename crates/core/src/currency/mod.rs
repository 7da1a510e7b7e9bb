//! Multi-currency handling and exchange rates.

pub mod conversion;
pub mod error;
pub mod exchange;
pub mod fallback;
pub mod gateway;

pub use conversion::{convert_amount, round_money};
pub use error::FxError;
pub use exchange::{RateCacheSnapshot, RateQuote, RateSource, RateTable};
pub use fallback::fallback_rate;
pub use gateway::{Conversion, ExchangeGateway, RateProvider, RateSnapshotStore};
