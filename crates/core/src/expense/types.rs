//! Expense domain types.
//!
//! Field names serialize in camelCase to match the documents stored by the
//! web apps (`paidBy`, `eventId`, ...).

use chrono::NaiveDate;
use justsplit_shared::CurrencyCode;
use justsplit_shared::types::{EventId, ExpenseId, GroupId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shared expense paid by one user and split evenly among participants.
///
/// Amount, currency and participants never change after creation; only
/// `settled` is flipped once the debt it created has been paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Free-text description.
    pub description: String,
    /// Total amount paid.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: CurrencyCode,
    /// Date the expense happened.
    pub date: NaiveDate,
    /// User who paid.
    pub paid_by: UserId,
    /// Users sharing the expense (may include the payer).
    pub participants: Vec<UserId>,
    /// Event the expense belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    /// Group the expense belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Whether the debt created by this expense has been paid.
    #[serde(default)]
    pub settled: bool,
    /// Optional category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Expense {
    /// Returns each participant's even share of `amount`, or `None` when the
    /// expense has no participants.
    #[must_use]
    pub fn share_of(&self, amount: Decimal) -> Option<Decimal> {
        let count = Decimal::from(self.participants.len());
        amount.checked_div(count)
    }

    /// Returns true if `user` is among the participants.
    #[must_use]
    pub fn has_participant(&self, user: &UserId) -> bool {
        self.participants.contains(user)
    }
}

/// A user as seen by the splitting app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Cached net balance. Derived from expenses; never authoritative.
    #[serde(default)]
    pub balance: Decimal,
    /// Friends of this user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friends: Option<Vec<UserId>>,
}

impl User {
    /// Creates a user with a zero balance and no friends list.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance: Decimal::ZERO,
            friends: None,
        }
    }
}

/// An event (trip, dinner, ...) grouping expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event ID.
    pub id: EventId,
    /// Event name.
    pub name: String,
    /// Member user IDs.
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Expenses recorded for the event.
    #[serde(default)]
    pub expense_ids: Vec<ExpenseId>,
    /// Preferred currency for the event's totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_currency: Option<CurrencyCode>,
}

impl Event {
    /// Returns true if `user` is a member.
    #[must_use]
    pub fn has_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }
}

/// A long-lived group of users sharing expenses across events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Member user IDs.
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Events organised by the group.
    #[serde(default)]
    pub event_ids: Vec<EventId>,
}

impl Group {
    /// Returns true if `user` is a member.
    #[must_use]
    pub fn has_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expense(participants: &[&str]) -> Expense {
        Expense {
            id: "e1".into(),
            description: "Dinner".into(),
            amount: dec!(90),
            currency: CurrencyCode::USD,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            paid_by: "user1".into(),
            participants: participants.iter().map(|p| UserId::from(*p)).collect(),
            event_id: None,
            group_id: None,
            settled: false,
            category: None,
        }
    }

    #[test]
    fn test_share_of() {
        let e = expense(&["user1", "user2", "user3"]);
        assert_eq!(e.share_of(e.amount), Some(dec!(30)));
    }

    #[test]
    fn test_share_of_without_participants() {
        let e = expense(&[]);
        assert_eq!(e.share_of(e.amount), None);
    }

    #[test]
    fn test_deserialize_camel_case_document() {
        let json = r#"{
            "id": "exp1",
            "description": "Taxi",
            "amount": 42.5,
            "currency": "eur",
            "date": "2024-03-09",
            "paidBy": "alice",
            "participants": ["alice", "bob"],
            "eventId": "trip"
        }"#;

        let e: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(e.amount, dec!(42.5));
        assert_eq!(e.currency, CurrencyCode::EUR);
        assert_eq!(e.paid_by, UserId::from("alice"));
        assert_eq!(e.event_id, Some(EventId::from("trip")));
        assert!(!e.settled);
        assert!(e.has_participant(&UserId::from("bob")));
    }

    #[test]
    fn test_membership() {
        let group = Group {
            id: "g1".into(),
            name: "Flatmates".into(),
            members: vec!["alice".into(), "bob".into()],
            event_ids: vec![],
        };
        assert!(group.has_member(&UserId::from("bob")));
        assert!(!group.has_member(&UserId::from("carol")));
    }
}
