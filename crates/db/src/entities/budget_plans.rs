//! `SeaORM` Entity for budget_plans table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub year: i32,
    pub currency: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub income_target_yearly: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub income_target_monthly: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub income_target_weekly: Decimal,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_allocations::Entity")]
    BudgetAllocations,
}

impl Related<super::budget_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
