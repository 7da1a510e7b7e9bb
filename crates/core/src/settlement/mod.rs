//! Debt settlement: balance accumulation and greedy netting.
//!
//! This module implements the settle-up flow:
//! - Net balances per user from a list of expenses
//! - Minimal payment instructions from those balances
//! - Settlement records, optionally converted to one currency
//! - Marking expenses settled once a payment is confirmed

pub mod balance;
pub mod calculator;
pub mod confirm;
pub mod netting;
pub mod types;

#[cfg(test)]
mod props;

pub use balance::{BalanceSheet, accumulate, refresh_user_balances};
pub use calculator::{
    DEFAULT_CURRENCY, calculate_settlements, calculate_settlements_with_conversion,
};
pub use confirm::mark_settled;
pub use netting::{SETTLEMENT_THRESHOLD, net_balances};
pub use types::{Settlement, SettlementInstruction};
