//! Budget report assembly.

use lifeplan_shared::types::DateRange;
use rust_decimal::Decimal;

use super::base_income::compute_period_base_income;
use super::classifier::classify_transactions;
use super::types::{BaseMode, BudgetPlan, BudgetReport, LedgerEntry};
use super::variance::compute_buckets;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Computes budget vs actual for a plan over a period.
    ///
    /// Entries outside `range` are ignored. The base income is resolved from
    /// the plan targets, the period income and the optional override, then
    /// every allocation is measured against it.
    #[must_use]
    pub fn compute_report(
        plan: &BudgetPlan,
        entries: &[LedgerEntry],
        range: DateRange,
        base_mode: BaseMode,
        override_amount: Option<Decimal>,
    ) -> BudgetReport {
        let totals = classify_transactions(entries.iter().filter(|e| range.contains(e.date)));

        let base_income = compute_period_base_income(
            base_mode,
            &plan.income_targets,
            totals.income,
            &range,
            override_amount,
        );

        let buckets = compute_buckets(&plan.allocations, base_income, &totals);

        BudgetReport {
            year: plan.year,
            range,
            currency: plan.currency.clone(),
            base_mode,
            base_income,
            totals,
            buckets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::types::{
        Allocation, AllocationKind, IncomeTargets, TransactionType, VarianceStatus,
    };
    use chrono::NaiveDate;
    use lifeplan_shared::types::OwnerId;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn plan(allocations: Vec<Allocation>, targets: IncomeTargets) -> BudgetPlan {
        BudgetPlan {
            id: None,
            owner: OwnerId::new(),
            year: 2025,
            currency: "INR".to_string(),
            income_targets: targets,
            allocations,
            notes: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn entry(day: &str, kind: TransactionType, amount: Decimal, category: &str) -> LedgerEntry {
        LedgerEntry {
            date: date(day),
            kind,
            amount,
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn test_rent_over_budget_in_target_mode() {
        let plan = plan(
            vec![
                Allocation {
                    key: "rent".into(),
                    label: "Rent".into(),
                    kind: AllocationKind::Expense,
                    percent: dec!(20),
                },
                Allocation {
                    key: "profit".into(),
                    label: "Profit".into(),
                    kind: AllocationKind::Profit,
                    percent: dec!(80),
                },
            ],
            IncomeTargets {
                monthly: dec!(100000),
                ..IncomeTargets::default()
            },
        );
        let entries = vec![entry("2025-01-05", TransactionType::Expense, dec!(25000), "rent")];
        let range = DateRange::new(date("2025-01-01"), date("2025-01-30"));

        let report =
            BudgetService::compute_report(&plan, &entries, range, BaseMode::Target, None);

        assert_eq!(report.base_income, dec!(100000));
        let rent = &report.buckets[0];
        assert_eq!(rent.budget_amount, dec!(20000));
        assert_eq!(rent.actual_amount, dec!(25000));
        assert_eq!(rent.variance_amount, dec!(5000));
        assert!(rent.status.is_bad());
    }

    #[test]
    fn test_entries_outside_range_are_ignored() {
        let plan = plan(Vec::new(), IncomeTargets::default());
        let entries = vec![
            entry("2024-12-31", TransactionType::Income, dec!(100), "salary"),
            entry("2025-01-01", TransactionType::Income, dec!(200), "salary"),
            entry("2025-01-31", TransactionType::Expense, dec!(50), "food"),
            entry("2025-02-01", TransactionType::Expense, dec!(75), "food"),
        ];
        let range = DateRange::new(date("2025-01-01"), date("2025-01-31"));

        let report =
            BudgetService::compute_report(&plan, &entries, range, BaseMode::Actual, None);

        assert_eq!(report.totals.income, dec!(200));
        assert_eq!(report.totals.outflow, dec!(50));
        assert_eq!(report.totals.transaction_count, 2);
        assert_eq!(report.base_income, dec!(200));
    }

    #[test]
    fn test_no_transactions_yield_negative_expense_variance() {
        let plan = plan(
            vec![Allocation {
                key: "self".into(),
                label: "Self".into(),
                kind: AllocationKind::Expense,
                percent: dec!(100),
            }],
            IncomeTargets::default(),
        );
        let range = DateRange::new(date("2025-01-01"), date("2025-01-31"));

        let report =
            BudgetService::compute_report(&plan, &[], range, BaseMode::Actual, Some(dec!(1000)));

        let bucket = &report.buckets[0];
        assert_eq!(report.totals.profit, dec!(0));
        assert_eq!(bucket.variance_amount, dec!(-1000));
        assert_eq!(bucket.status, VarianceStatus::Favorable);
        assert!(!bucket.status.is_bad());
    }

    #[test]
    fn test_report_carries_plan_metadata() {
        let mut p = plan(Vec::new(), IncomeTargets::default());
        p.currency = "USD".into();
        let range = DateRange::new(date("2025-03-01"), date("2025-03-07"));

        let report = BudgetService::compute_report(&p, &[], range, BaseMode::Target, None);

        assert_eq!(report.year, 2025);
        assert_eq!(report.currency, "USD");
        assert_eq!(report.base_mode, BaseMode::Target);
        assert_eq!(report.range, range);
        assert!(report.buckets.is_empty());
    }
}
