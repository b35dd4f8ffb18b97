//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Each one also implements the matching `lifeplan_core::store` trait.

pub mod budget_plan;
pub mod transaction;

pub use budget_plan::BudgetPlanRepository;
pub use transaction::TransactionRepository;
