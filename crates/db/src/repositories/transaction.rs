//! Transaction repository for ledger database operations.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use lifeplan_core::budget::{LedgerEntry, NewTransaction, Transaction, TransactionType};
use lifeplan_core::store::{LedgerStore, StoreError};
use lifeplan_shared::types::{DateRange, OwnerId, TransactionId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::transactions;
use crate::error::RepositoryError;

/// Transaction repository. Rows are insert-only.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a validated transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        owner_id: Uuid,
        input: NewTransaction,
    ) -> Result<transactions::Model, DbErr> {
        transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            owner_id: Set(owner_id),
            transaction_date: Set(input.date),
            transaction_type: Set(input.kind.as_str().to_string()),
            amount: Set(input.amount),
            category: Set(input.category),
            description: Set(input.description),
            account_name: Set(input.account_name),
            mode: Set(input.mode),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Lists transactions dated between `start` and `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_in_range(
        &self,
        owner_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .filter(transactions::Column::TransactionDate.between(start, end))
            .order_by_asc(transactions::Column::TransactionDate)
            .all(&self.db)
            .await
    }

    /// Lists the newest transactions, most recently recorded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_recent(
        &self,
        owner_id: Uuid,
        limit: u64,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }
}

fn parse_type(row: &transactions::Model) -> Option<TransactionType> {
    match row.transaction_type.parse() {
        Ok(kind) => Some(kind),
        Err(e) => {
            tracing::warn!(transaction_id = %row.id, error = %e, "Skipping transaction");
            None
        }
    }
}

fn to_transaction(row: transactions::Model, kind: TransactionType) -> Transaction {
    Transaction {
        id: TransactionId::from_uuid(row.id),
        owner: OwnerId::from_uuid(row.owner_id),
        date: row.transaction_date,
        kind,
        amount: row.amount,
        category: row.category,
        description: row.description,
        account_name: row.account_name,
        mode: row.mode,
        created_at: row.created_at.with_timezone(&Utc),
    }
}

#[async_trait]
impl LedgerStore for TransactionRepository {
    async fn transactions_in_range(
        &self,
        owner: OwnerId,
        range: DateRange,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let rows = self
            .find_in_range(owner.into_inner(), range.start_date, range.end_date)
            .await
            .map_err(RepositoryError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let kind = parse_type(&row)?;
                Some(LedgerEntry {
                    date: row.transaction_date,
                    kind,
                    amount: row.amount,
                    category: row.category,
                })
            })
            .collect())
    }

    async fn record_transaction(
        &self,
        owner: OwnerId,
        input: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let kind = input.kind;
        let row = self
            .create(owner.into_inner(), input)
            .await
            .map_err(RepositoryError::from)?;

        tracing::debug!(transaction_id = %row.id, kind = kind.as_str(), "Recorded transaction");
        Ok(to_transaction(row, kind))
    }

    async fn recent_transactions(
        &self,
        owner: OwnerId,
        limit: u64,
    ) -> Result<Vec<Transaction>, StoreError> {
        let rows = self
            .find_recent(owner.into_inner(), limit)
            .await
            .map_err(RepositoryError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let kind = parse_type(&row)?;
                Some(to_transaction(row, kind))
            })
            .collect())
    }
}
