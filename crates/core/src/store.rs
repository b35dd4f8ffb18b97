//! Storage traits implemented by the database layer.
//!
//! Handlers hold these as `Arc<dyn ...>` so tests can swap in an in-memory
//! implementation.

use async_trait::async_trait;
use lifeplan_shared::types::{DateRange, OwnerId};
use thiserror::Error;

use crate::budget::{BudgetPlan, BudgetPlanDraft, LedgerEntry, NewTransaction, Transaction};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be mapped back into a domain value.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Persistence of yearly budget plans.
#[async_trait]
pub trait BudgetPlanStore: Send + Sync {
    /// Loads the plan of `owner` for `year`, if one was saved.
    async fn find_plan(&self, owner: OwnerId, year: i32) -> Result<Option<BudgetPlan>, StoreError>;

    /// Inserts or replaces the plan of `owner` for `draft.year`.
    async fn save_plan(&self, owner: OwnerId, draft: BudgetPlanDraft)
    -> Result<BudgetPlan, StoreError>;
}

/// Persistence of ledger transactions.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Entries of `owner` dated within `range`, both ends inclusive.
    async fn transactions_in_range(
        &self,
        owner: OwnerId,
        range: DateRange,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Records a validated transaction.
    async fn record_transaction(
        &self,
        owner: OwnerId,
        input: NewTransaction,
    ) -> Result<Transaction, StoreError>;

    /// The newest transactions of `owner`, most recent first.
    async fn recent_transactions(
        &self,
        owner: OwnerId,
        limit: u64,
    ) -> Result<Vec<Transaction>, StoreError>;
}

