//! Net balance accumulation.
//!
//! Sign convention: positive means the user is owed money, negative means the
//! user owes money. Every recorded expense credits the payer the full amount
//! and debits each participant an even share, so the balances of a sheet
//! always sum to zero (up to decimal precision).

use std::collections::HashMap;

use justsplit_shared::types::UserId;
use rust_decimal::Decimal;

use crate::currency::round_money;
use crate::expense::{Expense, ExpenseFilter, User};

/// Net balance per user, in insertion order.
///
/// Order matters: the netter breaks ties by it, so users are kept in the order
/// they were first seen.
#[derive(Debug, Clone, Default)]
pub struct BalanceSheet {
    entries: Vec<(UserId, Decimal)>,
    index: HashMap<UserId, usize>,
}

impl BalanceSheet {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sheet with a zero balance for each user, in order.
    #[must_use]
    pub fn with_users(users: &[User]) -> Self {
        let mut sheet = Self::new();
        for user in users {
            sheet.slot(&user.id);
        }
        sheet
    }

    fn slot(&mut self, user: &UserId) -> &mut Decimal {
        let idx = match self.index.get(user) {
            Some(&idx) => idx,
            None => {
                self.entries.push((user.clone(), Decimal::ZERO));
                let idx = self.entries.len() - 1;
                self.index.insert(user.clone(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Adds `amount` to what `user` is owed.
    pub fn credit(&mut self, user: &UserId, amount: Decimal) {
        *self.slot(user) += amount;
    }

    /// Adds `amount` to what `user` owes.
    pub fn debit(&mut self, user: &UserId, amount: Decimal) {
        *self.slot(user) -= amount;
    }

    /// Records one expense, valued at `amount` in the sheet's currency.
    ///
    /// Expenses without participants are skipped; returns whether the expense
    /// was recorded.
    pub fn record_expense(&mut self, expense: &Expense, amount: Decimal) -> bool {
        let Some(share) = expense.share_of(amount) else {
            return false;
        };

        self.credit(&expense.paid_by, amount);
        for participant in &expense.participants {
            self.debit(participant, share);
        }
        true
    }

    /// Returns the balance of `user`, zero if unknown.
    #[must_use]
    pub fn get(&self, user: &UserId) -> Decimal {
        self.index
            .get(user)
            .map_or(Decimal::ZERO, |&idx| self.entries[idx].1)
    }

    /// Iterates balances in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, Decimal)> {
        self.entries.iter().map(|(user, balance)| (user, *balance))
    }

    /// Number of users on the sheet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no user is on the sheet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances; zero for a consistent sheet.
    #[must_use]
    pub fn net_total(&self) -> Decimal {
        self.entries.iter().map(|(_, balance)| *balance).sum()
    }
}

/// Builds a single-currency sheet from the expenses passing `filter`.
///
/// Amounts are taken as-is, whatever their currency.
#[must_use]
pub fn accumulate(expenses: &[Expense], users: &[User], filter: &ExpenseFilter) -> BalanceSheet {
    let mut sheet = BalanceSheet::with_users(users);
    for expense in filter.apply(expenses) {
        sheet.record_expense(expense, expense.amount);
    }
    sheet
}

/// Recomputes the cached `balance` of every user from the unsettled expenses.
pub fn refresh_user_balances(users: &mut [User], expenses: &[Expense]) {
    let sheet = accumulate(expenses, users, &ExpenseFilter::unsettled());
    for user in users.iter_mut() {
        user.balance = round_money(sheet.get(&user.id));
    }
}
