//! Business rule validation for incoming expenses and amounts.

use justsplit_shared::AppError;
use justsplit_shared::types::ExpenseId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::Expense;

/// Largest amount accepted anywhere (one trillion).
///
/// Sums and conversions of amounts up to this bound stay far inside the
/// range of `Decimal`, so balance arithmetic cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Validation errors for expenses and amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseValidationError {
    /// Expense amount is zero or negative.
    #[error("Expense {0} must have a positive amount")]
    NonPositiveAmount(ExpenseId),

    /// Amount is beyond [`MAX_AMOUNT`].
    #[error("Amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge {
        /// Rejected amount.
        amount: Decimal,
        /// Accepted maximum.
        max: Decimal,
    },
}

impl From<ExpenseValidationError> for AppError {
    fn from(err: ExpenseValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Checks that an amount, of either sign, is within [`MAX_AMOUNT`].
///
/// # Errors
///
/// Returns `AmountTooLarge` if the magnitude exceeds the bound.
pub fn validate_amount(amount: Decimal) -> Result<(), ExpenseValidationError> {
    if amount.abs() > MAX_AMOUNT {
        return Err(ExpenseValidationError::AmountTooLarge {
            amount,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// Checks that every expense has a positive amount within [`MAX_AMOUNT`].
///
/// # Errors
///
/// Returns the first violation found, in input order.
pub fn validate_expenses(expenses: &[Expense]) -> Result<(), ExpenseValidationError> {
    for expense in expenses {
        if expense.amount <= Decimal::ZERO {
            return Err(ExpenseValidationError::NonPositiveAmount(expense.id.clone()));
        }
        validate_amount(expense.amount)?;
    }
    Ok(())
}
