//! Dashboard data types.

use justsplit_shared::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spend overview for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    /// Currency every total is expressed in.
    pub currency: CurrencyCode,
    /// Spend still waiting to be settled, converted.
    pub unsettled_total: Decimal,
    /// Spend already settled, converted.
    pub settled_total: Decimal,
    /// Number of expenses considered.
    pub expense_count: usize,
    /// Number of unsettled expenses.
    pub unsettled_count: usize,
    /// Raw totals per original currency.
    pub by_currency: Vec<CurrencyTotal>,
    /// Currencies converted with a fallback rate.
    pub fallback_currencies: Vec<CurrencyCode>,
}

impl ExpenseSummary {
    /// Combined settled and unsettled spend.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.unsettled_total + self.settled_total
    }

    /// Returns true if any total relies on an approximate rate.
    #[must_use]
    pub fn is_approximate(&self) -> bool {
        !self.fallback_currencies.is_empty()
    }
}

/// Unconverted spend in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotal {
    /// Original currency.
    pub currency: CurrencyCode,
    /// Sum of amounts, rounded to cents.
    pub amount: Decimal,
    /// Number of expenses in this currency.
    pub count: usize,
}
