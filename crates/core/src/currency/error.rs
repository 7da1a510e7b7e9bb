//! Exchange rate error types.

use justsplit_shared::types::InvalidCurrencyCode;
use thiserror::Error;

/// Errors raised by rate providers and snapshot stores.
///
/// The gateway never returns these to its callers; they are logged and the
/// quote degrades to a fallback rate.
#[derive(Debug, Error)]
pub enum FxError {
    /// The request could not be sent or timed out.
    #[error("rate request failed: {0}")]
    Http(String),

    /// The rate API answered with a non-success HTTP status.
    #[error("rate API returned status {status} for {base}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Base currency requested.
        base: String,
    },

    /// The rate API answered but reported a failure in its body.
    #[error("rate API reported result '{result}' for {base}")]
    Unsuccessful {
        /// Value of the `result` field.
        result: String,
        /// Base currency requested.
        base: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode rate response: {0}")]
    Decode(String),

    /// The rate API named a base currency that is not a valid code.
    #[error("rate API returned an invalid currency: {0}")]
    InvalidCurrency(#[from] InvalidCurrencyCode),

    /// The snapshot store failed.
    #[error("rate cache storage failed: {0}")]
    Storage(String),
}
