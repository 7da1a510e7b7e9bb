//! Property-based tests for balance accumulation and netting.
//!
//! - Balances always sum to zero
//! - Payments reproduce the balances they settle
//! - `n` non-zero balances need at most `n - 1` payments
//! - Settled expenses never contribute
//! - Converted settlements reproduce the converted balances

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use justsplit_shared::CurrencyCode;
use justsplit_shared::types::UserId;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rust_decimal::Decimal;

use super::balance::{BalanceSheet, accumulate};
use super::calculator::{calculate_settlements, calculate_settlements_with_conversion};
use super::netting::{SETTLEMENT_THRESHOLD, net_balances};
use crate::currency::{ExchangeGateway, FxError, RateProvider, RateTable, convert_amount};
use crate::expense::{Expense, ExpenseFilter, User};

const USER_POOL: [&str; 6] = ["ana", "ben", "carla", "dani", "eli", "fer"];

const CURRENCIES: [CurrencyCode; 4] = [
    CurrencyCode::USD,
    CurrencyCode::EUR,
    CurrencyCode::COP,
    CurrencyCode::JPY,
];

/// Rate API that is always down, so every rate comes from the static table.
struct OfflineProvider;

#[async_trait]
impl RateProvider for OfflineProvider {
    async fn fetch_rates(&self, _base: CurrencyCode) -> Result<RateTable, FxError> {
        Err(FxError::Http("offline".into()))
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// Strategy to generate expense amounts (0.01 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate one expense with a random payer and participants.
fn expense() -> impl Strategy<Value = Expense> {
    (
        amount(),
        prop::sample::select(USER_POOL.to_vec()),
        prop::sample::subsequence(USER_POOL.to_vec(), 1..=USER_POOL.len()),
        any::<bool>(),
    )
        .prop_map(|(amount, payer, participants, settled)| Expense {
            id: format!("{payer}-{amount}").into(),
            description: String::new(),
            amount,
            currency: CurrencyCode::USD,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default(),
            paid_by: payer.into(),
            participants: participants.into_iter().map(UserId::from).collect(),
            event_id: None,
            group_id: None,
            settled,
            category: None,
        })
}

fn expenses() -> impl Strategy<Value = Vec<Expense>> {
    prop::collection::vec(expense(), 0..20)
}

/// Strategy to generate expenses spread over several currencies.
fn mixed_currency_expenses() -> impl Strategy<Value = Vec<Expense>> {
    prop::collection::vec(
        (expense(), prop::sample::select(CURRENCIES.to_vec())).prop_map(|(mut e, currency)| {
            e.currency = currency;
            e
        }),
        0..20,
    )
}

fn users() -> Vec<User> {
    USER_POOL.iter().map(|id| User::new(*id, *id)).collect()
}

/// Checks that each user's received minus paid amounts match their balance,
/// up to cent rounding and the settlement threshold.
fn check_payments_reproduce<'a>(
    sheet: &BalanceSheet,
    payments: impl IntoIterator<Item = (&'a UserId, &'a UserId, Decimal)>,
) -> Result<(), TestCaseError> {
    let mut flows: HashMap<&UserId, Decimal> = HashMap::new();
    for (from, to, amount) in payments {
        *flows.entry(to).or_default() += amount;
        *flows.entry(from).or_default() -= amount;
    }

    let tolerance = Decimal::new(2, 2) * Decimal::from(sheet.len().max(1));
    for (user, balance) in sheet.iter() {
        let flow = flows.get(user).copied().unwrap_or_default();
        prop_assert!(
            (flow - balance).abs() <= tolerance,
            "User {} has balance {} but payments net {}",
            user,
            balance,
            flow
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* expense list, net balances sum to zero.
    #[test]
    fn prop_balances_sum_to_zero(expenses in expenses()) {
        let sheet = accumulate(&expenses, &users(), &ExpenseFilter::unsettled());

        prop_assert!(
            sheet.net_total().abs() < Decimal::new(1, 6),
            "Net total should be zero, got {}",
            sheet.net_total()
        );
    }

    /// *For any* expense list, each user's received minus paid amounts match
    /// their balance, up to cent rounding and the settlement threshold.
    #[test]
    fn prop_payments_reproduce_balances(expenses in expenses()) {
        let sheet = accumulate(&expenses, &users(), &ExpenseFilter::unsettled());
        let instructions = net_balances(&sheet, &[]);

        check_payments_reproduce(
            &sheet,
            instructions
                .iter()
                .map(|i| (&i.from_user, &i.to_user, i.amount)),
        )?;
    }

    /// *For any* expense list, the netter emits at most `n - 1` payments for
    /// `n` users with a balance beyond the threshold.
    #[test]
    fn prop_at_most_n_minus_one_payments(expenses in expenses()) {
        let sheet = accumulate(&expenses, &users(), &ExpenseFilter::unsettled());
        let non_zero = sheet
            .iter()
            .filter(|(_, balance)| balance.abs() > SETTLEMENT_THRESHOLD)
            .count();

        let instructions = net_balances(&sheet, &[]);

        prop_assert!(instructions.len() <= non_zero.saturating_sub(1));
        prop_assert!(instructions.iter().all(|i| i.amount > Decimal::ZERO));
        prop_assert!(instructions.iter().all(|i| i.from_user != i.to_user));
    }

    /// *For any* expense list, adding settled expenses changes nothing.
    #[test]
    fn prop_settled_expenses_do_not_contribute(
        expenses in expenses(),
        settled in expenses(),
    ) {
        let open: Vec<Expense> = expenses.into_iter().filter(|e| !e.settled).collect();
        let mut all = open.clone();
        all.extend(settled.into_iter().map(|mut e| {
            e.settled = true;
            e
        }));

        let summary = |list: &[Expense]| {
            calculate_settlements(list, &users(), None)
                .into_iter()
                .map(|s| (s.from_user, s.to_user, s.amount))
                .collect::<Vec<_>>()
        };

        prop_assert_eq!(summary(&open), summary(&all));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// *For any* mixed-currency expense list, the converted balances sum to
    /// zero and the converted settlements reproduce them.
    #[test]
    fn prop_converted_payments_reproduce_balances(expenses in mixed_currency_expenses()) {
        let target = CurrencyCode::EUR;
        let gateway = ExchangeGateway::new(Arc::new(OfflineProvider));

        let (settlements, rates) = block_on(async {
            let settlements =
                calculate_settlements_with_conversion(&expenses, &users(), target, None, &gateway)
                    .await;
            let mut rates = HashMap::new();
            for currency in CURRENCIES {
                let quote = gateway.get_exchange_rate(currency, target).await;
                rates.insert(currency, quote.rate);
            }
            (settlements, rates)
        });

        let mut sheet = BalanceSheet::with_users(&users());
        for expense in ExpenseFilter::unsettled().apply(&expenses) {
            sheet.record_expense(expense, convert_amount(expense.amount, rates[&expense.currency]));
        }

        prop_assert!(
            sheet.net_total().abs() < Decimal::new(1, 6),
            "Converted net total should be zero, got {}",
            sheet.net_total()
        );
        prop_assert!(settlements.iter().all(|s| s.currency == target));
        check_payments_reproduce(
            &sheet,
            settlements.iter().map(|s| (&s.from_user, &s.to_user, s.amount)),
        )?;
    }
}
