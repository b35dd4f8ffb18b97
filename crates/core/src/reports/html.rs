//! HTML renderers for the downloadable reports.
//!
//! Documents are Tera templates with autoescaping on, so every value taken
//! from a plan or the ledger is escaped on the way out. Figures are formatted
//! here and reach the templates as strings.

use chrono::{DateTime, SecondsFormat, Utc};
use lifeplan_shared::types::{format_money, format_percent, ratio_percent};
use serde::Serialize;
use tera::{Context, Tera};

use super::error::ReportError;
use crate::budget::{BudgetPlan, BudgetReport, PeriodTotals, VarianceBucket};

const BASE: &str = "base.html";
const BUDGET: &str = "budget.html";
const GUIDE: &str = "guide.html";
const REALITY: &str = "reality.html";
const VARIANCE: &str = "variance.html";

const TEMPLATES: [(&str, &str); 5] = [
    (BASE, include_str!("templates/base.html")),
    (BUDGET, include_str!("templates/budget.html")),
    (GUIDE, include_str!("templates/guide.html")),
    (REALITY, include_str!("templates/reality.html")),
    (VARIANCE, include_str!("templates/variance.html")),
];

#[derive(Serialize)]
struct AllocationRow<'a> {
    label: &'a str,
    key: &'a str,
    kind: &'static str,
    percent: String,
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    category: &'a str,
    amount: String,
}

#[derive(Serialize)]
struct BucketRow<'a> {
    label: &'a str,
    key: &'a str,
    kind: &'static str,
    percent: String,
    budget: String,
    actual: String,
    variance: String,
    tone: &'static str,
}

impl<'a> BucketRow<'a> {
    fn new(bucket: &'a VarianceBucket, currency: &str) -> Self {
        Self {
            label: &bucket.label,
            key: &bucket.key,
            kind: bucket.kind.as_str(),
            percent: format_percent(bucket.percent),
            budget: format_money(bucket.budget_amount, currency),
            actual: format_money(bucket.actual_amount, currency),
            variance: format_money(bucket.variance_amount, currency),
            tone: if bucket.status.is_bad() { "bad" } else { "good" },
        }
    }
}

/// Renders the four report documents.
///
/// Build one at startup and share it; rendering takes `&self`.
#[derive(Debug)]
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    /// Parses the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Render`] if a template does not parse.
    pub fn new() -> Result<Self, ReportError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)
            .map_err(|e| ReportError::Render(format!("failed to load templates: {e}")))?;
        Ok(Self { tera })
    }

    /// Renders the saved plan: income targets, allocation table and notes.
    pub fn budget_plan(
        &self,
        plan: &BudgetPlan,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ReportError> {
        let currency = plan.currency.as_str();
        let targets = &plan.income_targets;
        let allocations: Vec<AllocationRow<'_>> = plan
            .allocations
            .iter()
            .map(|a| AllocationRow {
                label: &a.label,
                key: &a.key,
                kind: a.kind.as_str(),
                percent: format_percent(a.percent),
            })
            .collect();

        let mut context = base_context(generated_at);
        context.insert("year", &plan.year);
        context.insert("yearly", &format_money(targets.yearly, currency));
        context.insert("monthly", &format_money(targets.monthly, currency));
        context.insert("weekly", &format_money(targets.weekly, currency));
        context.insert("allocations", &allocations);
        context.insert("notes", &plan.notes);

        self.render(BUDGET, &context)
    }

    /// Renders the static budgeting guide.
    pub fn guide(&self, generated_at: DateTime<Utc>) -> Result<String, ReportError> {
        self.render(GUIDE, &base_context(generated_at))
    }

    /// Renders period actuals: totals and outflow by category, largest first.
    pub fn reality(
        &self,
        report: &BudgetReport,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ReportError> {
        let currency = report.currency.as_str();
        let categories: Vec<CategoryRow<'_>> = report
            .totals
            .categories_by_outflow()
            .into_iter()
            .map(|(category, amount)| CategoryRow {
                category,
                amount: format_money(amount, currency),
            })
            .collect();

        let mut context = period_context(report, generated_at);
        context.insert("categories", &categories);

        self.render(REALITY, &context)
    }

    /// Renders budget vs actual per bucket.
    ///
    /// The variance cell carries class `bad` for unfavorable buckets and
    /// `good` otherwise.
    pub fn variance(
        &self,
        report: &BudgetReport,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ReportError> {
        let currency = report.currency.as_str();
        let buckets: Vec<BucketRow<'_>> = report
            .buckets
            .iter()
            .map(|b| BucketRow::new(b, currency))
            .collect();

        let mut context = period_context(report, generated_at);
        context.insert("base_mode", report.base_mode.as_str());
        context.insert("base_income", &format_money(report.base_income, currency));
        context.insert("buckets", &buckets);

        self.render(VARIANCE, &context)
    }

    fn render(&self, name: &str, context: &Context) -> Result<String, ReportError> {
        self.tera
            .render(name, context)
            .map_err(|e| ReportError::Render(format!("{name}: {e}")))
    }
}

fn base_context(generated_at: DateTime<Utc>) -> Context {
    let mut context = Context::new();
    context.insert(
        "generated_at",
        &generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    context
}

fn period_context(report: &BudgetReport, generated_at: DateTime<Utc>) -> Context {
    let currency = report.currency.as_str();
    let PeriodTotals {
        income,
        outflow,
        profit,
        ..
    } = report.totals;

    let mut context = base_context(generated_at);
    context.insert("year", &report.year);
    context.insert(
        "start_date",
        &report.range.start_date.format("%Y-%m-%d").to_string(),
    );
    context.insert(
        "end_date",
        &report.range.end_date.format("%Y-%m-%d").to_string(),
    );
    context.insert("income", &format_money(income, currency));
    context.insert("outflow", &format_money(outflow, currency));
    context.insert("profit", &format_money(profit, currency));
    context.insert("profit_ratio", &format_percent(ratio_percent(profit, income)));
    context
}
