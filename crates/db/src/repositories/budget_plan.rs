//! Budget plan repository.

use async_trait::async_trait;
use chrono::Utc;
use lifeplan_core::budget::{Allocation, BudgetPlan, BudgetPlanDraft, IncomeTargets};
use lifeplan_core::store::{BudgetPlanStore, StoreError};
use lifeplan_shared::types::{BudgetPlanId, OwnerId};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{budget_allocations, budget_plans};
use crate::error::RepositoryError;

/// Budget plan repository, one plan per owner and year.
#[derive(Debug, Clone)]
pub struct BudgetPlanRepository {
    db: DatabaseConnection,
}

impl BudgetPlanRepository {
    /// Creates a new budget plan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the plan of an owner for a year, allocations in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored allocation kind is unknown.
    pub async fn find_by_owner_year(
        &self,
        owner_id: Uuid,
        year: i32,
    ) -> Result<Option<BudgetPlan>, RepositoryError> {
        let Some(plan) = budget_plans::Entity::find()
            .filter(budget_plans::Column::OwnerId.eq(owner_id))
            .filter(budget_plans::Column::Year.eq(year))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let allocations = load_allocations(&self.db, plan.id).await?;
        plan_from_models(plan, allocations).map(Some)
    }

    /// Inserts the plan or replaces the existing one for the same year.
    ///
    /// Allocations are rewritten in full inside one database transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written then.
    pub async fn upsert(
        &self,
        owner_id: Uuid,
        draft: BudgetPlanDraft,
    ) -> Result<BudgetPlan, RepositoryError> {
        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();

        let existing = budget_plans::Entity::find()
            .filter(budget_plans::Column::OwnerId.eq(owner_id))
            .filter(budget_plans::Column::Year.eq(draft.year))
            .one(&txn)
            .await?;

        let plan = if let Some(model) = existing {
            let plan_id = model.id;
            let mut active: budget_plans::ActiveModel = model.into();
            active.currency = Set(draft.currency.clone());
            active.income_target_yearly = Set(draft.income_targets.yearly);
            active.income_target_monthly = Set(draft.income_targets.monthly);
            active.income_target_weekly = Set(draft.income_targets.weekly);
            active.notes = Set(draft.notes.clone());
            active.updated_at = Set(now);
            let updated = active.update(&txn).await?;

            budget_allocations::Entity::delete_many()
                .filter(budget_allocations::Column::PlanId.eq(plan_id))
                .exec(&txn)
                .await?;
            updated
        } else {
            budget_plans::ActiveModel {
                id: Set(Uuid::now_v7()),
                owner_id: Set(owner_id),
                year: Set(draft.year),
                currency: Set(draft.currency.clone()),
                income_target_yearly: Set(draft.income_targets.yearly),
                income_target_monthly: Set(draft.income_targets.monthly),
                income_target_weekly: Set(draft.income_targets.weekly),
                notes: Set(draft.notes.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?
        };

        if !draft.allocations.is_empty() {
            let rows = draft
                .allocations
                .iter()
                .enumerate()
                .map(|(position, allocation)| {
                    let position = i32::try_from(position)
                        .map_err(|_| RepositoryError::Corrupt("too many allocations".into()))?;
                    Ok(budget_allocations::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        plan_id: Set(plan.id),
                        position: Set(position),
                        key: Set(allocation.key.clone()),
                        label: Set(allocation.label.clone()),
                        kind: Set(allocation.kind.as_str().to_string()),
                        percent: Set(allocation.percent),
                    })
                })
                .collect::<Result<Vec<_>, RepositoryError>>()?;

            budget_allocations::Entity::insert_many(rows)
                .exec(&txn)
                .await?;
        }

        let allocations = load_allocations(&txn, plan.id).await?;
        txn.commit().await?;

        tracing::debug!(
            plan_id = %plan.id,
            year = plan.year,
            buckets = allocations.len(),
            "Saved budget plan"
        );

        plan_from_models(plan, allocations)
    }
}

async fn load_allocations<C: ConnectionTrait>(
    conn: &C,
    plan_id: Uuid,
) -> Result<Vec<budget_allocations::Model>, DbErr> {
    budget_allocations::Entity::find()
        .filter(budget_allocations::Column::PlanId.eq(plan_id))
        .order_by_asc(budget_allocations::Column::Position)
        .all(conn)
        .await
}

fn plan_from_models(
    plan: budget_plans::Model,
    allocations: Vec<budget_allocations::Model>,
) -> Result<BudgetPlan, RepositoryError> {
    let allocations = allocations
        .into_iter()
        .map(|row| {
            Ok(Allocation {
                kind: row.kind.parse().map_err(RepositoryError::Corrupt)?,
                key: row.key,
                label: row.label,
                percent: row.percent,
            })
        })
        .collect::<Result<Vec<_>, RepositoryError>>()?;

    Ok(BudgetPlan {
        id: Some(BudgetPlanId::from_uuid(plan.id)),
        owner: OwnerId::from_uuid(plan.owner_id),
        year: plan.year,
        currency: plan.currency,
        income_targets: IncomeTargets {
            yearly: plan.income_target_yearly,
            monthly: plan.income_target_monthly,
            weekly: plan.income_target_weekly,
        },
        allocations,
        notes: plan.notes,
        created_at: Some(plan.created_at.with_timezone(&Utc)),
        updated_at: Some(plan.updated_at.with_timezone(&Utc)),
    })
}

#[async_trait]
impl BudgetPlanStore for BudgetPlanRepository {
    async fn find_plan(&self, owner: OwnerId, year: i32) -> Result<Option<BudgetPlan>, StoreError> {
        Ok(self.find_by_owner_year(owner.into_inner(), year).await?)
    }

    async fn save_plan(
        &self,
        owner: OwnerId,
        draft: BudgetPlanDraft,
    ) -> Result<BudgetPlan, StoreError> {
        Ok(self.upsert(owner.into_inner(), draft).await?)
    }
}
