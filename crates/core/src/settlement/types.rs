//! Settlement domain types.

use chrono::{DateTime, Utc};
use justsplit_shared::{CurrencyCode, Money};
use justsplit_shared::types::{EventId, ExpenseId, SettlementId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One payment produced by the netter, before it is turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementInstruction {
    /// User who pays.
    pub from_user: UserId,
    /// User who is paid.
    pub to_user: UserId,
    /// Amount, rounded to cents.
    pub amount: Decimal,
    /// Expenses the creditor paid for and the debtor took part in.
    ///
    /// Best-effort trace-back: netting can route a debt through a user who
    /// never shared an expense with the payer, in which case this is empty.
    pub expense_ids: Vec<ExpenseId>,
}

/// A net payment between two users.
///
/// Produced by the calculator; stored once the user confirms the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Settlement ID.
    pub id: SettlementId,
    /// User who pays.
    pub from_user: UserId,
    /// User who is paid.
    pub to_user: UserId,
    /// Amount, rounded to cents.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: CurrencyCode,
    /// When the settlement was calculated.
    pub date: DateTime<Utc>,
    /// Expenses this payment settles.
    #[serde(default)]
    pub expense_ids: Vec<ExpenseId>,
    /// Event the settlement was restricted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
}

impl Settlement {
    /// Creates a settlement record from a netting instruction.
    #[must_use]
    pub fn from_instruction(
        instruction: SettlementInstruction,
        currency: CurrencyCode,
        event_id: Option<EventId>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SettlementId::generate(),
            from_user: instruction.from_user,
            to_user: instruction.to_user,
            amount: instruction.amount,
            currency,
            date,
            expense_ids: instruction.expense_ids,
            event_id,
        }
    }

    /// Amount and currency of the payment.
    #[must_use]
    pub const fn money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }
}
