//! Settlement calculation over expense lists.

use std::collections::BTreeMap;

use chrono::Utc;
use justsplit_shared::CurrencyCode;
use justsplit_shared::types::EventId;
use tracing::{debug, info, warn};

use super::balance::{BalanceSheet, accumulate};
use super::netting::net_balances;
use super::types::Settlement;
use crate::currency::{ExchangeGateway, RateQuote, convert_amount};
use crate::expense::{Expense, ExpenseFilter, User};

/// Currency used to label settlements when no expense contributes one.
pub const DEFAULT_CURRENCY: CurrencyCode = CurrencyCode::USD;

/// Calculates the payments that settle all unsettled expenses.
///
/// Expenses are assumed to share one currency; amounts are summed as-is. The
/// settlements are labelled with the currency of the first contributing
/// expense. When `event_id` is given only that event's expenses count.
#[must_use]
pub fn calculate_settlements(
    expenses: &[Expense],
    users: &[User],
    event_id: Option<&EventId>,
) -> Vec<Settlement> {
    let filter = ExpenseFilter::unsettled().for_event(event_id);
    let contributing: Vec<&Expense> = filter.apply(expenses).collect();

    let currency = contributing
        .first()
        .map_or(DEFAULT_CURRENCY, |e| e.currency);
    if contributing.iter().any(|e| e.currency != currency) {
        warn!(
            %currency,
            "Expenses span several currencies; amounts are summed without conversion"
        );
    }

    let sheet = accumulate(expenses, users, &filter);
    let settlements = build(&sheet, &contributing, currency, event_id);

    debug!(
        expenses = contributing.len(),
        users = sheet.len(),
        settlements = settlements.len(),
        %currency,
        "Calculated settlements"
    );
    settlements
}

/// Calculates settlements after converting every expense to `target`.
///
/// Each expense is converted before it is split; only the final payment
/// amounts are rounded. The gateway is asked once per distinct source
/// currency, so every expense in a currency uses the same rate. Rates that fell
/// back to the static table are logged but never abort the calculation.
pub async fn calculate_settlements_with_conversion(
    expenses: &[Expense],
    users: &[User],
    target: CurrencyCode,
    event_id: Option<&EventId>,
    gateway: &ExchangeGateway,
) -> Vec<Settlement> {
    let filter = ExpenseFilter::unsettled().for_event(event_id);
    let contributing: Vec<&Expense> = filter.apply(expenses).collect();

    let mut sheet = BalanceSheet::with_users(users);
    let mut quotes: BTreeMap<CurrencyCode, RateQuote> = BTreeMap::new();

    for expense in &contributing {
        if expense.participants.is_empty() {
            continue;
        }
        let rate = match quotes.get(&expense.currency) {
            Some(quote) => quote.rate,
            None => {
                let quote = gateway.get_exchange_rate(expense.currency, target).await;
                let rate = quote.rate;
                quotes.insert(expense.currency, quote);
                rate
            }
        };
        sheet.record_expense(expense, convert_amount(expense.amount, rate));
    }

    let fallback_currencies: Vec<CurrencyCode> = quotes
        .values()
        .filter(|quote| quote.is_fallback)
        .map(|quote| quote.from)
        .collect();
    if !fallback_currencies.is_empty() {
        info!(
            ?fallback_currencies,
            %target,
            "Some expenses were converted with fallback rates"
        );
    }

    let settlements = build(&sheet, &contributing, target, event_id);
    debug!(
        expenses = contributing.len(),
        currencies = quotes.len(),
        users = sheet.len(),
        residual = %sheet.net_total(),
        settlements = settlements.len(),
        %target,
        "Calculated converted settlements"
    );
    settlements
}

fn build(
    sheet: &BalanceSheet,
    contributing: &[&Expense],
    currency: CurrencyCode,
    event_id: Option<&EventId>,
) -> Vec<Settlement> {
    let date = Utc::now();
    net_balances(sheet, contributing)
        .into_iter()
        .map(|instruction| {
            Settlement::from_instruction(instruction, currency, event_id.cloned(), date)
        })
        .collect()
}
