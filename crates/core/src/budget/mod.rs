//! Budget plans and budget-vs-actual variance analysis.

pub mod base_income;
pub mod classifier;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;
pub mod variance;


pub use base_income::compute_period_base_income;
pub use classifier::{classify_transactions, normalize_category};
pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{
    Allocation, AllocationInput, AllocationKind, BaseMode, BudgetPlan, BudgetPlanDraft,
    BudgetReport, IncomeTargets, LedgerEntry, NewTransaction, NewTransactionInput, PeriodTotals,
    SaveBudgetPlanInput, Transaction, TransactionType, VarianceBucket, VarianceStatus,
};
pub use validation::{
    default_plan, json_decimal, validate_new_transaction, validate_plan, validate_year,
    year_from_json,
};
pub use variance::compute_buckets;
