//! Spend totals converted to one display currency.

use std::collections::BTreeMap;

use justsplit_shared::CurrencyCode;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::{CurrencyTotal, ExpenseSummary};
use crate::currency::{ExchangeGateway, convert_amount, round_money};
use crate::expense::Expense;

#[derive(Debug, Default)]
struct Bucket {
    unsettled: Decimal,
    settled: Decimal,
    count: usize,
    unsettled_count: usize,
}

/// Totals the spend of `expenses` in `target`.
///
/// Amounts are summed per original currency first, so each currency is
/// converted once. A fallback rate is recorded in `fallback_currencies` and
/// never aborts the summary. Totals are rounded only at the end.
pub async fn summarize_expenses(
    expenses: &[Expense],
    target: CurrencyCode,
    gateway: &ExchangeGateway,
) -> ExpenseSummary {
    let mut buckets: BTreeMap<CurrencyCode, Bucket> = BTreeMap::new();
    for expense in expenses {
        let bucket = buckets.entry(expense.currency).or_default();
        bucket.count += 1;
        if expense.settled {
            bucket.settled += expense.amount;
        } else {
            bucket.unsettled += expense.amount;
            bucket.unsettled_count += 1;
        }
    }

    let mut unsettled_total = Decimal::ZERO;
    let mut settled_total = Decimal::ZERO;
    let mut unsettled_count = 0;
    let mut fallback_currencies = Vec::new();
    let mut by_currency = Vec::with_capacity(buckets.len());

    for (currency, bucket) in buckets {
        let quote = gateway.get_exchange_rate(currency, target).await;
        if quote.is_fallback {
            warn!(
                %currency,
                %target,
                rate = %quote.rate,
                "Summary uses an approximate exchange rate"
            );
            fallback_currencies.push(currency);
        }

        unsettled_total += convert_amount(bucket.unsettled, quote.rate);
        settled_total += convert_amount(bucket.settled, quote.rate);
        unsettled_count += bucket.unsettled_count;
        by_currency.push(CurrencyTotal {
            currency,
            amount: round_money(bucket.unsettled + bucket.settled),
            count: bucket.count,
        });
    }

    debug!(
        expenses = expenses.len(),
        currencies = by_currency.len(),
        %target,
        "Summarized expenses"
    );

    ExpenseSummary {
        currency: target,
        unsettled_total: round_money(unsettled_total),
        settled_total: round_money(settled_total),
        expense_count: expenses.len(),
        unsettled_count,
        by_currency,
        fallback_currencies,
    }
}
