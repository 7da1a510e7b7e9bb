//! Dashboard spend summary.

pub mod summary;
pub mod types;

pub use summary::summarize_expenses;
pub use types::{CurrencyTotal, ExpenseSummary};
