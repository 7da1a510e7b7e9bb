//! Confirmation of settlement payments.

use tracing::debug;

use super::types::Settlement;
use crate::expense::Expense;

/// Marks the expenses referenced by a confirmed settlement as settled.
///
/// Expenses not named in `settlement.expense_ids` are left alone. Returns how
/// many expenses changed state; already settled ones are not counted.
pub fn mark_settled(expenses: &mut [Expense], settlement: &Settlement) -> usize {
    let mut changed = 0;
    for expense in expenses
        .iter_mut()
        .filter(|e| settlement.expense_ids.contains(&e.id))
    {
        if !expense.settled {
            expense.settled = true;
            changed += 1;
        }
    }

    debug!(
        settlement_id = %settlement.id,
        changed,
        "Marked expenses settled"
    );
    changed
}
