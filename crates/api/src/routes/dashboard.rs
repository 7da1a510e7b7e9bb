//! Dashboard routes.

use axum::{Router, extract::State, routing::post};
use justsplit_core::dashboard::{ExpenseSummary, summarize_expenses};
use justsplit_core::expense::{Expense, validate_expenses};
use justsplit_shared::CurrencyCode;
use serde::Deserialize;

use crate::{AppState, error::ApiError, extract::Json};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/summary", post(get_summary))
}

/// Request body for the spend summary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// Expenses to total.
    pub expenses: Vec<Expense>,
    /// Display currency; the configured default when absent.
    pub target_currency: Option<String>,
}

/// POST `/dashboard/summary` - Spend totals in one currency.
async fn get_summary(
    State(state): State<AppState>,
    Json(payload): Json<SummaryRequest>,
) -> Result<Json<ExpenseSummary>, ApiError> {
    validate_expenses(&payload.expenses)?;
    let target = match payload.target_currency.as_deref() {
        Some(code) => code.parse::<CurrencyCode>()?,
        None => state.default_currency,
    };

    let summary = summarize_expenses(&payload.expenses, target, &state.gateway).await;
    Ok(Json(summary))
}
