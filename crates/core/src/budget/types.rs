//! Budget data types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use lifeplan_shared::types::{BudgetPlanId, DateRange, OwnerId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of an allocation bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationKind {
    /// Planned spending; overspending is unfavorable.
    #[default]
    Expense,
    /// Profit target; under-delivering is unfavorable.
    Profit,
}

impl AllocationKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Profit => "profit",
        }
    }
}

impl std::fmt::Display for AllocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AllocationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "profit" => Ok(Self::Profit),
            _ => Err(format!("Unknown allocation kind: {s}")),
        }
    }
}

/// A percentage share of base income assigned to a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Stable identifier, matched against transaction categories.
    pub key: String,
    /// Display name, also matched against transaction categories.
    pub label: String,
    /// Bucket kind.
    pub kind: AllocationKind,
    /// Share of base income, 0 to 100.
    pub percent: Decimal,
}

/// Income targets of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTargets {
    /// Target income for the whole year.
    #[serde(rename = "incomeTargetYearly")]
    pub yearly: Decimal,
    /// Target income per month.
    #[serde(rename = "incomeTargetMonthly")]
    pub monthly: Decimal,
    /// Target income per week.
    #[serde(rename = "incomeTargetWeekly")]
    pub weekly: Decimal,
}

/// A yearly budget plan of one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    /// Plan ID, absent for the unsaved default plan.
    pub id: Option<BudgetPlanId>,
    /// Owning user.
    #[serde(skip)]
    pub owner: OwnerId,
    /// Plan year.
    pub year: i32,
    /// Currency code used when rendering amounts.
    pub currency: String,
    /// Income targets.
    #[serde(flatten)]
    pub income_targets: IncomeTargets,
    /// Buckets in display order.
    pub allocations: Vec<Allocation>,
    /// Free-form notes.
    pub notes: String,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated plan ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetPlanDraft {
    /// Plan year.
    pub year: i32,
    /// Currency code.
    pub currency: String,
    /// Income targets.
    pub income_targets: IncomeTargets,
    /// Normalized buckets.
    pub allocations: Vec<Allocation>,
    /// Free-form notes.
    pub notes: String,
}

/// Raw allocation as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllocationInput {
    /// Bucket key.
    #[serde(default)]
    pub key: Option<String>,
    /// Bucket label.
    #[serde(default)]
    pub label: Option<String>,
    /// Bucket kind, expense when omitted.
    #[serde(default)]
    pub kind: Option<AllocationKind>,
    /// Share of base income.
    #[serde(default)]
    pub percent: Option<Decimal>,
}

/// Raw plan as submitted by a client.
///
/// Year and income targets stay loose JSON so that numeric strings are
/// accepted and bad values get their own message in [`validate_plan`].
///
/// [`validate_plan`]: super::validate_plan
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBudgetPlanInput {
    /// Plan year, as a number or numeric string.
    #[serde(default)]
    pub year: Option<Value>,
    /// Currency code, INR when omitted or blank.
    #[serde(default)]
    pub currency: Option<String>,
    /// Yearly income target.
    #[serde(default)]
    pub income_target_yearly: Option<Value>,
    /// Monthly income target.
    #[serde(default)]
    pub income_target_monthly: Option<Value>,
    /// Weekly income target.
    #[serde(default)]
    pub income_target_weekly: Option<Value>,
    /// Buckets.
    #[serde(default)]
    pub allocations: Vec<AllocationInput>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Ledger transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Everyday spending.
    Expense,
    /// Money moved into an investment.
    InvestmentIn,
    /// Loan installment.
    Emi,
    /// Earned income.
    Income,
    /// Borrowed money received.
    Loan,
    /// Money withdrawn from an investment.
    InvestmentOut,
}

impl TransactionType {
    /// All transaction types.
    pub const ALL: [Self; 6] = [
        Self::Expense,
        Self::InvestmentIn,
        Self::Emi,
        Self::Income,
        Self::Loan,
        Self::InvestmentOut,
    ];

    /// Returns true for types counted as income.
    #[must_use]
    pub const fn is_inflow(self) -> bool {
        matches!(self, Self::Income | Self::Loan | Self::InvestmentOut)
    }

    /// Returns true for types counted as outflow.
    #[must_use]
    pub const fn is_outflow(self) -> bool {
        matches!(self, Self::Expense | Self::InvestmentIn | Self::Emi)
    }

    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::InvestmentIn => "investment_in",
            Self::Emi => "emi",
            Self::Income => "income",
            Self::Loan => "loan",
            Self::InvestmentOut => "investment_out",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown transaction type: {s}"))
    }
}

/// The projection of a transaction needed for period totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Booking date.
    pub date: NaiveDate,
    /// Transaction type.
    pub kind: TransactionType,
    /// Amount, always in plan currency.
    pub amount: Decimal,
    /// Free-form category.
    pub category: Option<String>,
}

/// A recorded ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning user.
    #[serde(skip)]
    pub owner: OwnerId,
    /// Booking date.
    pub date: NaiveDate,
    /// Transaction type.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount.
    pub amount: Decimal,
    /// Category.
    pub category: Option<String>,
    /// Description.
    pub description: String,
    /// Account the money moved through.
    pub account_name: Option<String>,
    /// Payment mode (cash, upi, card...).
    pub mode: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the projection used for period totals.
    #[must_use]
    pub fn ledger_entry(&self) -> LedgerEntry {
        LedgerEntry {
            date: self.date,
            kind: self.kind,
            amount: self.amount,
            category: self.category.clone(),
        }
    }
}

/// Raw transaction as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionInput {
    /// Transaction type.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount.
    pub amount: Decimal,
    /// Booking date, `YYYY-MM-DD`.
    pub date: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category.
    #[serde(default)]
    pub category: Option<String>,
    /// Account name.
    #[serde(default)]
    pub account_name: Option<String>,
    /// Payment mode.
    #[serde(default)]
    pub mode: Option<String>,
}

/// A validated transaction ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Transaction type.
    pub kind: TransactionType,
    /// Positive amount.
    pub amount: Decimal,
    /// Booking date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Trimmed category, if any.
    pub category: Option<String>,
    /// Account name.
    pub account_name: Option<String>,
    /// Payment mode.
    pub mode: Option<String>,
}

/// Which figure percentages are applied against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseMode {
    /// Income actually received in the period.
    #[default]
    Actual,
    /// Plan income targets scaled to the period.
    Target,
}

impl BaseMode {
    /// Returns the wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Actual => "actual",
            Self::Target => "target",
        }
    }
}

/// Income and outflow aggregated over a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    /// Sum of inflow transactions.
    pub income: Decimal,
    /// Sum of outflow transactions.
    pub outflow: Decimal,
    /// `income - outflow`, may be negative.
    pub profit: Decimal,
    /// Outflow keyed by normalized category.
    #[serde(skip)]
    pub outflow_by_category: BTreeMap<String, Decimal>,
    /// Number of transactions seen.
    #[serde(skip)]
    pub transaction_count: usize,
}

impl PeriodTotals {
    /// Outflow recorded for an already normalized category.
    #[must_use]
    pub fn outflow_for(&self, category: &str) -> Decimal {
        self.outflow_by_category
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Categories sorted by outflow, largest first.
    #[must_use]
    pub fn categories_by_outflow(&self) -> Vec<(&str, Decimal)> {
        let mut rows: Vec<(&str, Decimal)> = self
            .outflow_by_category
            .iter()
            .map(|(category, amount)| (category.as_str(), *amount))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}

/// Variance status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Under budget for expenses, over target for profit.
    Favorable,
    /// Over budget for expenses, under target for profit.
    Unfavorable,
    /// Actual equals budget.
    OnBudget,
}

impl VarianceStatus {
    /// Classifies a bucket by its kind.
    ///
    /// Profit buckets are unfavorable when actual falls short of budget,
    /// all other buckets when actual exceeds budget.
    #[must_use]
    pub fn for_bucket(kind: AllocationKind, budget: Decimal, actual: Decimal) -> Self {
        let (bad, good) = match kind {
            AllocationKind::Profit => (actual < budget, actual > budget),
            AllocationKind::Expense => (actual > budget, actual < budget),
        };
        if bad {
            Self::Unfavorable
        } else if good {
            Self::Favorable
        } else {
            Self::OnBudget
        }
    }

    /// Returns true if the variance should be flagged.
    #[must_use]
    pub const fn is_bad(self) -> bool {
        matches!(self, Self::Unfavorable)
    }
}

/// Budget vs actual for one allocation bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VarianceBucket {
    /// Bucket key.
    pub key: String,
    /// Bucket label.
    pub label: String,
    /// Bucket kind.
    pub kind: AllocationKind,
    /// Share of base income.
    pub percent: Decimal,
    /// `percent * base_income / 100`.
    pub budget_amount: Decimal,
    /// Matched spend, or period profit for profit buckets.
    pub actual_amount: Decimal,
    /// `actual_amount - budget_amount`.
    pub variance_amount: Decimal,
    /// Variance as a share of base income, two decimals.
    pub variance_percent: Decimal,
    /// Kind-aware classification.
    pub status: VarianceStatus,
}

/// Full budget-vs-actual computation for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    /// Plan year.
    pub year: i32,
    /// Reporting period.
    pub range: DateRange,
    /// Plan currency.
    pub currency: String,
    /// Base income mode requested.
    pub base_mode: BaseMode,
    /// Resolved base income.
    pub base_income: Decimal,
    /// Period totals.
    pub totals: PeriodTotals,
    /// One entry per allocation, in plan order.
    pub buckets: Vec<VarianceBucket>,
}
