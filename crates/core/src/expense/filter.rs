//! Selection of the expenses that feed a calculation.

use justsplit_shared::types::EventId;
use serde::{Deserialize, Serialize};

use super::types::Expense;

/// Filter over an expense list.
///
/// The default filter keeps every unsettled expense.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    /// Keep only expenses tagged with this event.
    pub event_id: Option<EventId>,
}

impl ExpenseFilter {
    /// Creates a filter keeping every unsettled expense.
    #[must_use]
    pub fn unsettled() -> Self {
        Self::default()
    }

    /// Restricts the filter to one event when `event_id` is given.
    #[must_use]
    pub fn for_event(mut self, event_id: Option<&EventId>) -> Self {
        self.event_id = event_id.cloned();
        self
    }

    /// Returns true if the expense passes the filter.
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        if expense.settled {
            return false;
        }
        match &self.event_id {
            Some(event_id) => expense.event_id.as_ref() == Some(event_id),
            None => true,
        }
    }

    /// Returns the matching expenses, in input order.
    pub fn apply<'a>(&'a self, expenses: &'a [Expense]) -> impl Iterator<Item = &'a Expense> + 'a {
        expenses.iter().filter(move |e| self.matches(e))
    }
}
