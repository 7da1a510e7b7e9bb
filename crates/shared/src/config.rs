//! Application configuration management.

use serde::Deserialize;

use crate::types::CurrencyCode;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Exchange rate gateway configuration.
    #[serde(default)]
    pub exchange: ExchangeConfig,
    /// Rate cache snapshot storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Exchange rate gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// Base URL of the rate API; the base currency is appended as a path segment.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// How long a fetched rate table stays fresh, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Timeout for a single rate API request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum number of base currencies kept in memory.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    /// Currency used when no expense determines one.
    #[serde(default = "default_currency")]
    pub default_currency: CurrencyCode,
}

fn default_api_base_url() -> String {
    "https://open.er-api.com/v6/latest".to_string()
}

fn default_cache_ttl() -> u64 {
    21_600 // 6 hours
}

fn default_request_timeout() -> u64 {
    10
}

fn default_cache_capacity() -> u64 {
    64
}

fn default_currency() -> CurrencyCode {
    CurrencyCode::USD
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            cache_ttl_secs: default_cache_ttl(),
            request_timeout_secs: default_request_timeout(),
            cache_capacity: default_cache_capacity(),
            default_currency: default_currency(),
        }
    }
}

/// Storage for the persisted rate cache snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Filesystem root for the snapshot. In-memory storage is used when unset.
    #[serde(default)]
    pub root: Option<String>,
    /// Object key of the snapshot.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

fn default_snapshot_key() -> String {
    "justSplitData.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: None,
            snapshot_key: default_snapshot_key(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("JUSTSPLIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
