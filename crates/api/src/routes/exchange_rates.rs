//! Exchange rate routes.

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use justsplit_core::currency::{RateQuote, round_money};
use justsplit_core::expense::validate_amount;
use justsplit_shared::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    AppState,
    error::ApiError,
    extract::{Json, Query},
};

/// Creates the exchange rate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exchange-rates", get(get_exchange_rate))
        .route("/exchange-rates/convert", post(convert))
}

/// Query parameters for a rate lookup.
#[derive(Debug, Deserialize)]
pub struct ExchangeRateQuery {
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
}

/// Request body for a conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
}

/// Response for a conversion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Amount in the target currency, rounded to cents.
    pub converted_amount: Decimal,
    /// Quote used for the conversion.
    pub quote: RateQuote,
}

/// GET `/exchange-rates?from=EUR&to=USD` - Rate for a currency pair.
async fn get_exchange_rate(
    State(state): State<AppState>,
    Query(query): Query<ExchangeRateQuery>,
) -> Result<Json<RateQuote>, ApiError> {
    let from: CurrencyCode = query.from.parse()?;
    let to: CurrencyCode = query.to.parse()?;

    let quote = state.gateway.get_exchange_rate(from, to).await;
    Ok(Json(quote))
}

/// POST `/exchange-rates/convert` - Convert an amount between currencies.
async fn convert(
    State(state): State<AppState>,
    Json(payload): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, ApiError> {
    validate_amount(payload.amount)?;
    let from: CurrencyCode = payload.from.parse()?;
    let to: CurrencyCode = payload.to.parse()?;

    let conversion = state.gateway.convert(payload.amount, from, to).await;
    debug!(%from, %to, amount = %payload.amount, "Converted amount");

    Ok(Json(ConvertResponse {
        amount: payload.amount,
        converted_amount: round_money(conversion.amount),
        quote: conversion.quote,
    }))
}
