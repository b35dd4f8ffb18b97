//! Plan and transaction validation, plus the default plan.

use lifeplan_shared::types::{OwnerId, format_percent, parse_iso_date};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use super::error::BudgetError;
use super::types::{
    Allocation, AllocationInput, AllocationKind, BudgetPlan, BudgetPlanDraft, IncomeTargets,
    NewTransaction, NewTransactionInput, SaveBudgetPlanInput,
};

/// Earliest supported plan year.
pub const MIN_YEAR: i64 = 2000;
/// Latest supported plan year.
pub const MAX_YEAR: i64 = 3000;
/// Currency used when a plan does not name one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Allowed drift of the allocation total from 100%.
const TOTAL_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Checks that a year is within the supported range.
pub fn validate_year(year: i64) -> Result<i32, BudgetError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        i32::try_from(year).map_err(|_| BudgetError::InvalidYear)
    } else {
        Err(BudgetError::InvalidYear)
    }
}

/// Reads a year from a JSON number or numeric string.
///
/// Whole numbers written with a fraction, such as `2025.0`, are accepted.
pub fn year_from_json(value: &Value) -> Result<i32, BudgetError> {
    let year = json_decimal(value)
        .filter(|d| d.fract().is_zero())
        .and_then(|d| d.to_i64())
        .ok_or(BudgetError::InvalidYear)?;
    validate_year(year)
}

/// Reads a decimal from a JSON number or a numeric string.
///
/// Numbers go through their textual form, so no float is ever involved.
#[must_use]
pub fn json_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

// Absent, null and blank targets count as zero.
fn income_target(value: Option<&Value>) -> Result<Decimal, BudgetError> {
    match value {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Some(v) => json_decimal(v)
            .filter(|t| *t >= Decimal::ZERO)
            .ok_or(BudgetError::NegativeIncomeTarget),
    }
}

/// Validates a submitted plan and normalizes its allocations.
///
/// The year is required. Income targets may be omitted but must otherwise be
/// non-negative numbers. Allocations without a key, a label or a percent are
/// dropped. The remaining ones must each lie in 0..=100, add up to 100 within
/// 0.01, and contain at most one profit bucket.
pub fn validate_plan(input: SaveBudgetPlanInput) -> Result<BudgetPlanDraft, BudgetError> {
    let year = match input.year.as_ref() {
        None | Some(Value::Null) => return Err(BudgetError::InvalidYear),
        Some(v) => year_from_json(v)?,
    };

    let income_targets = IncomeTargets {
        yearly: income_target(input.income_target_yearly.as_ref())?,
        monthly: income_target(input.income_target_monthly.as_ref())?,
        weekly: income_target(input.income_target_weekly.as_ref())?,
    };

    let currency = input
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string();

    let allocations = normalize_allocations(input.allocations)?;

    Ok(BudgetPlanDraft {
        year,
        currency,
        income_targets,
        allocations,
        notes: input.notes.unwrap_or_default(),
    })
}

fn normalize_allocations(raw: Vec<AllocationInput>) -> Result<Vec<Allocation>, BudgetError> {
    let allocations: Vec<Allocation> = raw
        .into_iter()
        .filter_map(|a| {
            let key = a.key.as_deref().unwrap_or_default().trim().to_string();
            let label = a.label.as_deref().unwrap_or_default().trim().to_string();
            let percent = a.percent?;
            (!key.is_empty() && !label.is_empty()).then(|| Allocation {
                key,
                label,
                kind: a.kind.unwrap_or_default(),
                percent,
            })
        })
        .collect();

    if allocations
        .iter()
        .any(|a| a.percent < Decimal::ZERO || a.percent > Decimal::ONE_HUNDRED)
    {
        return Err(BudgetError::PercentOutOfRange);
    }

    let total: Decimal = allocations.iter().map(|a| a.percent).sum();
    if (total - Decimal::ONE_HUNDRED).abs() > TOTAL_TOLERANCE {
        return Err(BudgetError::AllocationTotalMismatch(format_percent(total)));
    }

    let profit_buckets = allocations
        .iter()
        .filter(|a| a.kind == AllocationKind::Profit)
        .count();
    if profit_buckets > 1 {
        return Err(BudgetError::MultipleProfitBuckets);
    }

    Ok(allocations)
}

/// Validates a submitted transaction.
pub fn validate_new_transaction(input: NewTransactionInput) -> Result<NewTransaction, BudgetError> {
    let description = input
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if description.is_empty() {
        return Err(BudgetError::MissingTransactionFields);
    }
    if input.amount <= Decimal::ZERO {
        return Err(BudgetError::NonPositiveAmount);
    }
    let date = parse_iso_date(&input.date).ok_or(BudgetError::InvalidDate)?;

    let trimmed = |v: Option<String>| {
        v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    };

    Ok(NewTransaction {
        kind: input.kind,
        amount: input.amount,
        date,
        description,
        category: trimmed(input.category),
        account_name: trimmed(input.account_name),
        mode: trimmed(input.mode),
    })
}

/// The plan offered to an owner who has not saved one for `year` yet.
#[must_use]
pub fn default_plan(owner: OwnerId, year: i32) -> BudgetPlan {
    let bucket = |key: &str, label: &str, percent: i64, kind: AllocationKind| Allocation {
        key: key.to_string(),
        label: label.to_string(),
        kind,
        percent: Decimal::from(percent),
    };
    let expense = AllocationKind::Expense;

    BudgetPlan {
        id: None,
        owner,
        year,
        currency: DEFAULT_CURRENCY.to_string(),
        income_targets: IncomeTargets::default(),
        allocations: vec![
            bucket("profit", "Profit Ratio", 30, AllocationKind::Profit),
            bucket("self", "Self Expense", 15, expense),
            bucket("family", "Family Expense", 15, expense),
            bucket("health", "Health", 5, expense),
            bucket("lic", "LIC / Insurance", 5, expense),
            bucket("saving", "Saving", 10, expense),
            bucket("fd", "FD", 5, expense),
            bucket("investment", "Investment", 10, expense),
            bucket("growth_fund", "Growth Fund", 3, expense),
            bucket("asset", "Asset Expense", 1, expense),
            bucket("new_asset", "New Asset", 1, expense),
        ],
        notes: String::new(),
        created_at: None,
        updated_at: None,
    }
}
