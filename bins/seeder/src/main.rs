//! Database seeder for life planner development and testing.
//!
//! Seeds a demo owner with a budget plan for the current year and one month of
//! ledger activity, then prints a bearer token for that owner.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use lifeplan_core::budget::{BudgetPlanDraft, NewTransaction, TransactionType, default_plan};
use lifeplan_core::store::{BudgetPlanStore, LedgerStore};
use lifeplan_db::{BudgetPlanRepository, TransactionRepository};
use lifeplan_shared::types::OwnerId;
use lifeplan_shared::{AppConfig, JwtConfig, JwtService};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Demo owner ID (consistent for all seeds)
const DEMO_OWNER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// (day of month, type, amount, category, description)
const SAMPLE_TRANSACTIONS: &[(u32, TransactionType, i64, &str, &str)] = &[
    (1, TransactionType::Income, 100_000, "salary", "Monthly salary"),
    (2, TransactionType::Expense, 25_000, "Rent", "House rent"),
    (4, TransactionType::Expense, 9_500, "family", "Groceries"),
    (7, TransactionType::Emi, 6_000, "asset", "Scooter EMI"),
    (10, TransactionType::InvestmentIn, 10_000, "investment", "Index fund SIP"),
    (12, TransactionType::Expense, 2_400, "health", "Pharmacy"),
    (15, TransactionType::InvestmentIn, 5_000, "fd", "Fixed deposit"),
    (20, TransactionType::Expense, 3_200, "self", "Books and course"),
    (25, TransactionType::Expense, 5_000, "lic", "Insurance premium"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = lifeplan_db::connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    let owner = OwnerId::from_uuid(Uuid::parse_str(DEMO_OWNER_ID)?);
    let year = Utc::now().year();

    println!("Seeding budget plan for {year}...");
    seed_plan(&BudgetPlanRepository::new(db.clone()), owner, year).await?;

    println!("Seeding transactions...");
    seed_transactions(&TransactionRepository::new(db), owner, year).await?;

    let jwt = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: i64::try_from(config.jwt.access_token_expiry_secs / 60)
            .context("jwt.access_token_expiry_secs is too large")?,
    });
    let token = jwt.generate_access_token(owner)?;

    println!("Seeding complete!");
    println!("Demo owner: {owner}");
    println!(
        "Bearer token (expires in {}s): {token}",
        jwt.access_token_expires_in()
    );
    Ok(())
}

async fn seed_plan(plans: &BudgetPlanRepository, owner: OwnerId, year: i32) -> anyhow::Result<()> {
    if plans.find_plan(owner, year).await?.is_some() {
        println!("  Plan already exists, skipping...");
        return Ok(());
    }

    let mut plan = default_plan(owner, year);
    plan.income_targets.yearly = Decimal::from(1_200_000);
    plan.income_targets.monthly = Decimal::from(100_000);
    plan.income_targets.weekly = Decimal::from(25_000);

    let draft = BudgetPlanDraft {
        year,
        currency: plan.currency,
        income_targets: plan.income_targets,
        allocations: plan.allocations,
        notes: "Demo plan. Review buckets every Sunday.".to_string(),
    };
    let saved = plans.save_plan(owner, draft).await?;
    println!("  Saved plan with {} buckets", saved.allocations.len());
    Ok(())
}

async fn seed_transactions(
    ledger: &TransactionRepository,
    owner: OwnerId,
    year: i32,
) -> anyhow::Result<()> {
    if !ledger.recent_transactions(owner, 1).await?.is_empty() {
        println!("  Transactions already exist, skipping...");
        return Ok(());
    }

    for &(day, kind, amount, category, description) in SAMPLE_TRANSACTIONS {
        let date = NaiveDate::from_ymd_opt(year, 1, day).context("invalid sample date")?;
        ledger
            .record_transaction(
                owner,
                NewTransaction {
                    kind,
                    amount: Decimal::from(amount),
                    date,
                    description: description.to_string(),
                    category: Some(category.to_string()),
                    account_name: Some("Savings".to_string()),
                    mode: Some("upi".to_string()),
                },
            )
            .await?;
    }
    println!("  Recorded {} transactions", SAMPLE_TRANSACTIONS.len());
    Ok(())
}
