//! `SeaORM` entity definitions.

pub mod budget_allocations;
pub mod budget_plans;
pub mod transactions;

pub mod prelude {
    //! Entity re-exports.

    pub use super::budget_allocations::Entity as BudgetAllocations;
    pub use super::budget_plans::Entity as BudgetPlans;
    pub use super::transactions::Entity as Transactions;
}
