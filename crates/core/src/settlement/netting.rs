//! Greedy debt netting.
//!
//! # Algorithm
//!
//! 1. Split the balance sheet into debtors (owe money) and creditors (are owed)
//! 2. Sort both sides by amount, largest first; ties keep sheet order
//! 3. Pay the largest debtor's debt to the largest creditor, for the smaller
//!    of the two amounts
//! 4. Drop whichever side falls below one cent; repeat until a side is empty
//!
//! # Example
//!
//! ```text
//! Balances:            A: -50   B: +20   C: +30
//! Sorted debtors:      A 50
//! Sorted creditors:    C 30, B 20
//! Payments:            A pays C 30, A pays B 20
//! ```
//!
//! Each step zeroes at least one side, so `n` non-zero balances produce at
//! most `n - 1` payments. Because the sheet is zero-sum, debtors and creditors
//! run out together.

use justsplit_shared::types::{ExpenseId, UserId};
use rust_decimal::Decimal;

use super::balance::BalanceSheet;
use super::types::SettlementInstruction;
use crate::currency::round_money;
use crate::expense::Expense;

/// Balances and remainders below this amount are treated as settled.
pub const SETTLEMENT_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug)]
struct Position<'a> {
    user: &'a UserId,
    amount: Decimal,
}

/// Turns net balances into the payments that settle them.
///
/// `contributing` are the expenses the sheet was built from; they only serve
/// to attach a trace-back of expense IDs to each payment.
#[must_use]
pub fn net_balances(sheet: &BalanceSheet, contributing: &[&Expense]) -> Vec<SettlementInstruction> {
    if sheet.is_empty() {
        return Vec::new();
    }

    let mut debtors = Vec::new();
    let mut creditors = Vec::new();

    for (user, balance) in sheet.iter() {
        if balance > SETTLEMENT_THRESHOLD {
            creditors.push(Position {
                user,
                amount: balance,
            });
        } else if balance < -SETTLEMENT_THRESHOLD {
            debtors.push(Position {
                user,
                amount: -balance,
            });
        }
    }

    // Stable sorts: equal amounts keep sheet order
    debtors.sort_by(|a, b| b.amount.cmp(&a.amount));
    creditors.sort_by(|a, b| b.amount.cmp(&a.amount));

    let mut instructions = Vec::new();
    let (mut d, mut c) = (0, 0);

    while d < debtors.len() && c < creditors.len() {
        let debtor = &debtors[d];
        let creditor = &creditors[c];
        let amount = debtor.amount.min(creditor.amount);

        instructions.push(SettlementInstruction {
            from_user: debtor.user.clone(),
            to_user: creditor.user.clone(),
            amount: round_money(amount),
            expense_ids: trace_expenses(contributing, debtor.user, creditor.user),
        });

        debtors[d].amount -= amount;
        creditors[c].amount -= amount;

        if debtors[d].amount < SETTLEMENT_THRESHOLD {
            d += 1;
        }
        if creditors[c].amount < SETTLEMENT_THRESHOLD {
            c += 1;
        }
    }

    instructions
}

/// Expenses paid by `creditor` that `debtor` took part in.
fn trace_expenses(contributing: &[&Expense], debtor: &UserId, creditor: &UserId) -> Vec<ExpenseId> {
    contributing
        .iter()
        .filter(|e| &e.paid_by == creditor && e.has_participant(debtor))
        .map(|e| e.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sheet(balances: &[(&str, Decimal)]) -> BalanceSheet {
        let mut sheet = BalanceSheet::new();
        for (user, balance) in balances {
            sheet.credit(&UserId::from(*user), *balance);
        }
        sheet
    }

    fn pairs(instructions: &[SettlementInstruction]) -> Vec<(&str, &str, Decimal)> {
        instructions
            .iter()
            .map(|i| (i.from_user.as_str(), i.to_user.as_str(), i.amount))
            .collect()
    }

    #[test]
    fn test_empty_sheet() {
        assert!(net_balances(&BalanceSheet::new(), &[]).is_empty());
    }

    #[test]
    fn test_single_debt() {
        let result = net_balances(&sheet(&[("user1", dec!(50)), ("user2", dec!(-50))]), &[]);
        assert_eq!(pairs(&result), vec![("user2", "user1", dec!(50))]);
    }

    #[test]
    fn test_one_debtor_two_creditors() {
        let result = net_balances(
            &sheet(&[("A", dec!(-50)), ("B", dec!(20)), ("C", dec!(30))]),
            &[],
        );
        assert_eq!(
            pairs(&result),
            vec![("A", "C", dec!(30)), ("A", "B", dec!(20))]
        );
    }

    #[test]
    fn test_largest_matched_first() {
        let result = net_balances(
            &sheet(&[
                ("A", dec!(-10)),
                ("B", dec!(-40)),
                ("C", dec!(25)),
                ("D", dec!(25)),
            ]),
            &[],
        );
        // B (40) pays C then D; ties between C and D keep sheet order
        assert_eq!(
            pairs(&result),
            vec![
                ("B", "C", dec!(25)),
                ("B", "D", dec!(15)),
                ("A", "D", dec!(10)),
            ]
        );
    }

    #[test]
    fn test_sub_cent_balances_ignored() {
        let result = net_balances(
            &sheet(&[("A", dec!(0.004)), ("B", dec!(-0.004)), ("C", dec!(0))]),
            &[],
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_balances_of_exactly_one_cent_ignored() {
        let result = net_balances(&sheet(&[("A", dec!(0.01)), ("B", dec!(-0.01))]), &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_balances_just_above_one_cent_settled() {
        let result = net_balances(
            &sheet(&[("A", dec!(0.011)), ("B", dec!(-0.011))]),
            &[],
        );
        assert_eq!(pairs(&result), vec![("B", "A", dec!(0.01))]);
    }

    #[test]
    fn test_one_cent_remainder_keeps_debtor_in_queue() {
        // A owes 10.01; after paying B 10 the remainder of exactly 0.01 is not
        // below the threshold, so A also pays C
        let result = net_balances(
            &sheet(&[("A", dec!(-10.01)), ("B", dec!(10)), ("C", dec!(0.011))]),
            &[],
        );
        assert_eq!(
            pairs(&result),
            vec![("A", "B", dec!(10)), ("A", "C", dec!(0.01))]
        );
    }

    #[test]
    fn test_sub_cent_remainder_drops_debtor() {
        let result = net_balances(
            &sheet(&[("A", dec!(-10.009)), ("B", dec!(10)), ("C", dec!(0.011))]),
            &[],
        );
        assert_eq!(pairs(&result), vec![("A", "B", dec!(10))]);
    }

    #[test]
    fn test_at_most_n_minus_one_payments() {
        let result = net_balances(
            &sheet(&[
                ("A", dec!(-12.5)),
                ("B", dec!(-7.5)),
                ("C", dec!(-30)),
                ("D", dec!(35)),
                ("E", dec!(15)),
            ]),
            &[],
        );
        assert!(result.len() <= 4);
        let total: Decimal = result.iter().map(|i| i.amount).sum();
        assert_eq!(total, dec!(50));
    }
}
