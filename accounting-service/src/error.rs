use crate::models::ExpenseStatus;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown expense status: {0}")]
    UnknownStatus(String),

    #[error("Expense {id} is {from} and cannot become {to}")]
    InvalidTransition {
        id: String,
        from: ExpenseStatus,
        to: ExpenseStatus,
    },

    #[error("No expenses match the selected filters")]
    EmptySelection,
}

pub type AccountingResult<T> = Result<T, AccountingError>;
