//! `SeaORM` Entity for budget_allocations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_allocations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plan_id: Uuid,
    pub position: i32,
    pub key: String,
    pub label: String,
    pub kind: String,
    #[sea_orm(column_type = "Decimal(Some((7, 4)))")]
    pub percent: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budget_plans::Entity",
        from = "Column::PlanId",
        to = "super::budget_plans::Column::Id",
        on_delete = "Cascade"
    )]
    BudgetPlans,
}

impl Related<super::budget_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetPlans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
