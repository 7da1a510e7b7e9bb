//! Expenses and the containers that group them.

pub mod filter;
pub mod types;
pub mod validation;

pub use filter::ExpenseFilter;
pub use types::{Event, Expense, Group, User};
pub use validation::{
    ExpenseValidationError, MAX_AMOUNT, validate_amount, validate_expenses,
};
