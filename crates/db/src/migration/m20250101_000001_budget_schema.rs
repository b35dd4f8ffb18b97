//! Initial database migration.
//!
//! Creates the budget plan, allocation and transaction tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(BUDGET_PLANS_SQL).await?;
        db.execute_unprepared(BUDGET_ALLOCATIONS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const BUDGET_PLANS_SQL: &str = r"
CREATE TABLE budget_plans (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL,
    year INTEGER NOT NULL,
    currency VARCHAR(8) NOT NULL DEFAULT 'INR',
    income_target_yearly NUMERIC(19, 4) NOT NULL DEFAULT 0,
    income_target_monthly NUMERIC(19, 4) NOT NULL DEFAULT 0,
    income_target_weekly NUMERIC(19, 4) NOT NULL DEFAULT 0,
    notes TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_budget_plans_owner_year UNIQUE (owner_id, year),
    CONSTRAINT chk_budget_plans_year CHECK (year BETWEEN 2000 AND 3000),
    CONSTRAINT chk_budget_plans_targets CHECK (
        income_target_yearly >= 0
        AND income_target_monthly >= 0
        AND income_target_weekly >= 0
    )
);
";

const BUDGET_ALLOCATIONS_SQL: &str = r"
CREATE TABLE budget_allocations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    plan_id UUID NOT NULL REFERENCES budget_plans(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    key VARCHAR(100) NOT NULL,
    label VARCHAR(200) NOT NULL,
    kind VARCHAR(16) NOT NULL DEFAULT 'expense',
    percent NUMERIC(7, 4) NOT NULL,
    CONSTRAINT uq_budget_allocations_position UNIQUE (plan_id, position),
    CONSTRAINT chk_budget_allocations_kind CHECK (kind IN ('expense', 'profit')),
    CONSTRAINT chk_budget_allocations_percent CHECK (percent BETWEEN 0 AND 100)
);

-- At most one profit bucket per plan
CREATE UNIQUE INDEX idx_budget_allocations_single_profit
    ON budget_allocations(plan_id) WHERE kind = 'profit';
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL,
    transaction_date DATE NOT NULL,
    transaction_type VARCHAR(32) NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    category VARCHAR(200),
    description TEXT NOT NULL,
    account_name VARCHAR(200),
    mode VARCHAR(50),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_transactions_type CHECK (transaction_type IN (
        'expense', 'investment_in', 'emi', 'income', 'loan', 'investment_out'
    )),
    CONSTRAINT chk_transactions_amount CHECK (amount > 0)
);

-- Period scans for reports
CREATE INDEX idx_transactions_owner_date ON transactions(owner_id, transaction_date);

-- Recent transactions listing
CREATE INDEX idx_transactions_owner_created ON transactions(owner_id, created_at DESC);
";

const TRIGGERS_SQL: &str = r"
-- Recorded transactions are immutable
CREATE OR REPLACE FUNCTION prevent_transaction_update()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'Transactions are immutable once recorded.';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_prevent_transaction_update
BEFORE UPDATE ON transactions
FOR EACH ROW
EXECUTE FUNCTION prevent_transaction_update();
";

const DROP_ALL_SQL: &str = r"
DROP TRIGGER IF EXISTS trg_prevent_transaction_update ON transactions;
DROP FUNCTION IF EXISTS prevent_transaction_update();
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS budget_allocations CASCADE;
DROP TABLE IF EXISTS budget_plans CASCADE;
";
