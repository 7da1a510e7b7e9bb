//! JustSplit API Server
//!
//! Main entry point for the settlement and exchange rate service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use justsplit_api::{AppState, create_router};
use justsplit_core::currency::ExchangeGateway;
use justsplit_rates::{OpenErApiProvider, OpendalSnapshotStore};
use justsplit_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "justsplit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Rate provider and snapshot store
    let provider = OpenErApiProvider::from_config(&config.exchange)?;
    let store = OpendalSnapshotStore::from_config(&config.storage)?;
    info!(
        api = %config.exchange.api_base_url,
        snapshot_root = config.storage.root.as_deref().unwrap_or("<memory>"),
        snapshot_key = %store.key(),
        "Exchange rate adapters configured"
    );

    let gateway = ExchangeGateway::with_config(
        Arc::new(provider),
        config.exchange.cache_capacity,
        Duration::from_secs(config.exchange.cache_ttl_secs),
    )
    .with_store(Arc::new(store));

    // A missing or unreadable snapshot only means a cold cache
    if let Err(e) = gateway.restore().await {
        warn!(error = %e, "Could not restore exchange rate cache");
    }

    // Create application state
    let state = AppState::new(Arc::new(gateway), config.exchange.default_currency);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
