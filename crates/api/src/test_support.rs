//! Shared fixtures for route tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use justsplit_core::currency::{ExchangeGateway, FxError, RateProvider, RateTable};
use justsplit_shared::CurrencyCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tower::ServiceExt;

use crate::{AppState, create_router};

/// Quotes 1 EUR = 1.10 USD; every other base is offline.
struct EurProvider;

#[async_trait]
impl RateProvider for EurProvider {
    async fn fetch_rates(&self, base: CurrencyCode) -> Result<RateTable, FxError> {
        if base == CurrencyCode::EUR {
            Ok(RateTable::new(
                base,
                HashMap::from([(CurrencyCode::USD, dec!(1.10))]),
            ))
        } else {
            Err(FxError::Http("offline".into()))
        }
    }
}

pub fn app() -> Router {
    let gateway = ExchangeGateway::new(Arc::new(EurProvider));
    create_router(AppState::new(Arc::new(gateway), CurrencyCode::USD))
}

pub async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    send(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post(uri: &str, body: &serde_json::Value) -> (StatusCode, serde_json::Value) {
    send_raw(uri, &body.to_string()).await
}

/// Posts `body` verbatim as a JSON request.
pub async fn send_raw(uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap(),
    )
    .await
}

async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Reads a decimal serialized as a JSON string.
pub fn decimal(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}
