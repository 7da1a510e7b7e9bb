//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes over the settlement engine and exchange gateway
//! - JSON error responses, also for rejected request bodies

pub mod error;
pub mod extract;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use justsplit_core::currency::ExchangeGateway;
use justsplit_shared::CurrencyCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Exchange rate gateway shared by every request.
    pub gateway: Arc<ExchangeGateway>,
    /// Currency used when a request names none.
    pub default_currency: CurrencyCode,
}

impl AppState {
    /// Creates the state around a gateway.
    #[must_use]
    pub fn new(gateway: Arc<ExchangeGateway>, default_currency: CurrencyCode) -> Self {
        Self {
            gateway,
            default_currency,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
