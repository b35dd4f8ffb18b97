//! Budget error types.

use lifeplan_shared::AppError;
use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Year outside the supported range.
    #[error("Invalid year")]
    InvalidYear,

    /// A date is not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid startDate/endDate. Use YYYY-MM-DD.")]
    InvalidDate,

    /// An income target is negative.
    #[error("Income targets must be non-negative numbers")]
    NegativeIncomeTarget,

    /// An allocation percent is outside 0..=100.
    #[error("Allocation percent must be between 0 and 100")]
    PercentOutOfRange,

    /// Allocations do not add up to 100%.
    #[error("Allocation total must be 100%. Current: {0}%")]
    AllocationTotalMismatch(String),

    /// More than one profit bucket.
    #[error("Only one Profit bucket is allowed")]
    MultipleProfitBuckets,

    /// A transaction is missing its description.
    #[error("Required fields missing")]
    MissingTransactionFields,

    /// A transaction amount is zero or negative.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// No plan saved for the year.
    #[error("Budget plan not found. Save your plan first.")]
    PlanNotFound,
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::PlanNotFound => Self::NotFound(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
