//! HTTP client for the open.er-api.com rate API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use justsplit_core::currency::{FxError, RateProvider, RateTable};
use justsplit_shared::{CurrencyCode, ExchangeConfig};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, error};

/// `result` value of a successful response.
const RESULT_SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    rates: HashMap<String, Decimal>,
}

/// Rate provider backed by `GET {base_url}/{BASE}`.
pub struct OpenErApiProvider {
    base_url: String,
    client: Client,
}

impl OpenErApiProvider {
    /// Creates a provider with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FxError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FxError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Creates a provider from the exchange configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ExchangeConfig) -> Result<Self, FxError> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url_for(&self, base: CurrencyCode) -> String {
        format!("{}/{}", self.base_url, base)
    }
}

#[async_trait]
impl RateProvider for OpenErApiProvider {
    async fn fetch_rates(&self, base: CurrencyCode) -> Result<RateTable, FxError> {
        let url = self.url_for(base);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = %e, %base, "Rate request failed");
            FxError::Http(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FxError::Status {
                status: status.as_u16(),
                base: base.to_string(),
            });
        }

        let body = response
            .json::<LatestRatesResponse>()
            .await
            .map_err(|e| FxError::Decode(e.to_string()))?;

        let table = parse_response(base, body)?;
        debug!(%base, rates = table.rates.len(), "Fetched exchange rate table");
        Ok(table)
    }
}

/// Validates a decoded response and turns it into a rate table.
///
/// An invalid `base_code` fails the whole response; rate entries whose key is
/// not a valid currency code are dropped.
fn parse_response(base: CurrencyCode, body: LatestRatesResponse) -> Result<RateTable, FxError> {
    if body.result != RESULT_SUCCESS {
        return Err(FxError::Unsuccessful {
            result: body.result,
            base: base.to_string(),
        });
    }

    if let Some(code) = &body.base_code {
        let returned: CurrencyCode = code.parse()?;
        if returned != base {
            return Err(FxError::Decode(format!(
                "requested {base} but response is based on {returned}"
            )));
        }
    }

    let rates = body
        .rates
        .into_iter()
        .filter_map(|(code, rate)| match code.parse::<CurrencyCode>() {
            Ok(code) => Some((code, rate)),
            Err(e) => {
                debug!(error = %e, %base, "Skipping rate with invalid currency code");
                None
            }
        })
        .collect();

    Ok(RateTable::new(base, rates))
}
