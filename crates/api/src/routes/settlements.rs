//! Settlement routes.

use axum::{Router, extract::State, routing::post};
use justsplit_core::expense::{Expense, User, validate_expenses};
use justsplit_core::settlement::{
    Settlement, calculate_settlements, calculate_settlements_with_conversion, mark_settled,
};
use justsplit_shared::{AppError, CurrencyCode};
use justsplit_shared::types::EventId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, extract::Json};

/// Creates the settlement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settlements/calculate", post(calculate))
        .route("/settlements/confirm", post(confirm))
}

/// Request body for a settlement calculation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Expenses to settle.
    pub expenses: Vec<Expense>,
    /// Known users, in display order.
    #[serde(default)]
    pub users: Vec<User>,
    /// Restrict to one event.
    pub event_id: Option<EventId>,
    /// Convert every expense to this currency first.
    pub target_currency: Option<String>,
}

/// Response for a settlement calculation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    /// Payments that settle the debts.
    pub settlements: Vec<Settlement>,
    /// Sum of all payment amounts.
    pub total_volume: Decimal,
}

/// Request body for confirming a settlement.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    /// Current expense list.
    pub expenses: Vec<Expense>,
    /// Settlement the users paid.
    pub settlement: Settlement,
}

/// Response for confirming a settlement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    /// Expense list with the settled flags updated.
    pub expenses: Vec<Expense>,
    /// Number of expenses newly marked settled.
    pub settled_count: usize,
}

/// POST `/settlements/calculate` - Payments that settle the given expenses.
async fn calculate(
    State(state): State<AppState>,
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    validate_expenses(&payload.expenses)?;

    let event_id = payload.event_id.as_ref();
    let settlements = match payload.target_currency.as_deref() {
        Some(code) => {
            let target: CurrencyCode = code.parse()?;
            calculate_settlements_with_conversion(
                &payload.expenses,
                &payload.users,
                target,
                event_id,
                &state.gateway,
            )
            .await
        }
        None => calculate_settlements(&payload.expenses, &payload.users, event_id),
    };

    let total_volume = settlements.iter().map(|s| s.amount).sum();
    Ok(Json(CalculateResponse {
        settlements,
        total_volume,
    }))
}

/// POST `/settlements/confirm` - Mark the expenses of a paid settlement settled.
async fn confirm(Json(payload): Json<ConfirmRequest>) -> Result<Json<ConfirmResponse>, ApiError> {
    let ConfirmRequest {
        mut expenses,
        settlement,
    } = payload;

    if settlement.expense_ids.is_empty() {
        return Err(AppError::BusinessRule(format!(
            "Settlement {} references no expenses",
            settlement.id
        ))
        .into());
    }
    if !expenses
        .iter()
        .any(|e| settlement.expense_ids.contains(&e.id))
    {
        return Err(AppError::NotFound(format!(
            "None of the expenses of settlement {} were found",
            settlement.id
        ))
        .into());
    }

    let settled_count = mark_settled(&mut expenses, &settlement);
    info!(
        settlement_id = %settlement.id,
        from = %settlement.from_user,
        to = %settlement.to_user,
        amount = %settlement.money(),
        settled_count,
        "Settlement confirmed"
    );

    Ok(Json(ConfirmResponse {
        expenses,
        settled_count,
    }))
}
