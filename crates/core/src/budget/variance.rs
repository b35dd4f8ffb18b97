//! Bucket variance calculations.

use rust_decimal::Decimal;

use super::classifier::normalize;
use super::types::{Allocation, AllocationKind, PeriodTotals, VarianceBucket, VarianceStatus};

/// Bucket key that always tracks period profit.
const PROFIT_KEY: &str = "profit";

/// Computes budget vs actual for every allocation, preserving plan order.
#[must_use]
pub fn compute_buckets(
    allocations: &[Allocation],
    base_income: Decimal,
    totals: &PeriodTotals,
) -> Vec<VarianceBucket> {
    allocations
        .iter()
        .map(|allocation| compute_bucket(allocation, base_income, totals))
        .collect()
}

/// Computes budget vs actual for a single allocation.
///
/// Profit buckets (by kind, or by a `profit` key) compare against period
/// profit. Other buckets sum outflow matched by key and, when it differs, by
/// label.
#[must_use]
pub fn compute_bucket(
    allocation: &Allocation,
    base_income: Decimal,
    totals: &PeriodTotals,
) -> VarianceBucket {
    let key = allocation.key.trim().to_string();
    let label = if allocation.label.trim().is_empty() {
        key.clone()
    } else {
        allocation.label.trim().to_string()
    };

    let budget_amount = share_of(base_income, allocation.percent);

    let key_norm = normalize(&key);
    let label_norm = normalize(&label);
    let actual_amount = if allocation.kind == AllocationKind::Profit || key_norm == PROFIT_KEY {
        totals.profit
    } else {
        let by_label = if !label_norm.is_empty() && label_norm != key_norm {
            totals.outflow_for(&label_norm)
        } else {
            Decimal::ZERO
        };
        totals.outflow_for(&key_norm).saturating_add(by_label)
    };

    let variance_amount = actual_amount.saturating_sub(budget_amount);
    let variance_percent = if base_income > Decimal::ZERO {
        variance_amount
            .checked_div(base_income)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ZERO, |p| p.round_dp(2))
    } else {
        Decimal::ZERO
    };

    VarianceBucket {
        key,
        label,
        kind: allocation.kind,
        percent: allocation.percent,
        budget_amount,
        actual_amount,
        variance_amount,
        variance_percent,
        status: VarianceStatus::for_bucket(allocation.kind, budget_amount, actual_amount),
    }
}

// Divides first when the product would not fit a `Decimal`.
fn share_of(base_income: Decimal, percent: Decimal) -> Decimal {
    percent.checked_mul(base_income).map_or_else(
        || (percent / Decimal::ONE_HUNDRED).saturating_mul(base_income),
        |product| product / Decimal::ONE_HUNDRED,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn allocation(key: &str, label: &str, kind: AllocationKind, percent: Decimal) -> Allocation {
        Allocation {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            percent,
        }
    }

    fn totals(income: Decimal, categories: &[(&str, Decimal)]) -> PeriodTotals {
        let outflow_by_category: BTreeMap<String, Decimal> = categories
            .iter()
            .map(|(c, a)| ((*c).to_string(), *a))
            .collect();
        let outflow: Decimal = outflow_by_category.values().copied().sum();
        PeriodTotals {
            income,
            outflow,
            profit: income - outflow,
            outflow_by_category,
            transaction_count: categories.len(),
        }
    }

    #[test]
    fn test_expense_bucket_over_budget_is_unfavorable() {
        let t = totals(dec!(0), &[("rent", dec!(25000))]);
        let bucket = compute_bucket(
            &allocation("rent", "Rent", AllocationKind::Expense, dec!(20)),
            dec!(100000),
            &t,
        );

        assert_eq!(bucket.budget_amount, dec!(20000));
        assert_eq!(bucket.actual_amount, dec!(25000));
        assert_eq!(bucket.variance_amount, dec!(5000));
        assert_eq!(bucket.variance_percent, dec!(5));
        assert_eq!(bucket.status, VarianceStatus::Unfavorable);
        assert!(bucket.status.is_bad());
    }

    #[test]
    fn test_expense_bucket_under_budget_is_favorable() {
        let t = totals(dec!(0), &[("health", dec!(1000))]);
        let bucket = compute_bucket(
            &allocation("health", "Health", AllocationKind::Expense, dec!(5)),
            dec!(100000),
            &t,
        );

        assert_eq!(bucket.variance_amount, dec!(-4000));
        assert_eq!(bucket.status, VarianceStatus::Favorable);
    }

    #[test]
    fn test_expense_bucket_at_budget_is_not_bad() {
        let t = totals(dec!(0), &[("fd", dec!(5000))]);
        let bucket = compute_bucket(
            &allocation("fd", "FD", AllocationKind::Expense, dec!(5)),
            dec!(100000),
            &t,
        );

        assert_eq!(bucket.status, VarianceStatus::OnBudget);
        assert!(!bucket.status.is_bad());
    }

    #[test]
    fn test_profit_bucket_uses_period_profit() {
        let t = totals(dec!(100000), &[("rent", dec!(80000))]);
        let bucket = compute_bucket(
            &allocation("margin", "Profit Ratio", AllocationKind::Profit, dec!(30)),
            dec!(100000),
            &t,
        );

        assert_eq!(bucket.budget_amount, dec!(30000));
        assert_eq!(bucket.actual_amount, dec!(20000));
        assert_eq!(bucket.variance_amount, dec!(-10000));
        assert_eq!(bucket.status, VarianceStatus::Unfavorable);
    }

    #[test]
    fn test_profit_bucket_over_target_is_favorable() {
        let t = totals(dec!(100000), &[("rent", dec!(10000))]);
        let bucket = compute_bucket(
            &allocation("profit", "Profit", AllocationKind::Profit, dec!(30)),
            dec!(100000),
            &t,
        );

        assert_eq!(bucket.actual_amount, dec!(90000));
        assert_eq!(bucket.status, VarianceStatus::Favorable);
    }

    #[test]
    fn test_profit_key_on_expense_bucket_tracks_profit_with_expense_semantics() {
        let t = totals(dec!(100000), &[("profit", dec!(1)), ("rent", dec!(10000))]);
        let bucket = compute_bucket(
            &allocation(" Profit ", "Keep", AllocationKind::Expense, dec!(30)),
            dec!(100000),
            &t,
        );

        assert_eq!(bucket.actual_amount, dec!(89999));
        assert_eq!(bucket.status, VarianceStatus::Unfavorable);
    }

    #[test]
    fn test_key_and_label_matches_are_summed() {
        let t = totals(
            dec!(0),
            &[("self", dec!(300)), ("self expense", dec!(200)), ("other", dec!(50))],
        );
        let bucket = compute_bucket(
            &allocation("self", "Self Expense", AllocationKind::Expense, dec!(15)),
            dec!(10000),
            &t,
        );

        assert_eq!(bucket.actual_amount, dec!(500));
    }

    #[test]
    fn test_label_equal_to_key_is_counted_once() {
        let t = totals(dec!(0), &[("rent", dec!(300))]);
        let bucket = compute_bucket(
            &allocation("rent", "RENT", AllocationKind::Expense, dec!(15)),
            dec!(10000),
            &t,
        );

        assert_eq!(bucket.actual_amount, dec!(300));
    }

    #[test]
    fn test_blank_label_falls_back_to_key() {
        let t = totals(dec!(0), &[]);
        let bucket = compute_bucket(
            &allocation("rent", "  ", AllocationKind::Expense, dec!(15)),
            dec!(10000),
            &t,
        );

        assert_eq!(bucket.label, "rent");
    }

    #[test]
    fn test_zero_base_income_yields_zero_budget_and_percent() {
        let t = totals(dec!(0), &[("rent", dec!(10))]);
        let bucket = compute_bucket(
            &allocation("rent", "Rent", AllocationKind::Expense, dec!(20)),
            dec!(0),
            &t,
        );

        assert_eq!(bucket.budget_amount, dec!(0));
        assert_eq!(bucket.variance_percent, dec!(0));
        assert_eq!(bucket.status, VarianceStatus::Unfavorable);
    }

    #[test]
    fn test_buckets_preserve_plan_order() {
        let allocations = vec![
            allocation("z", "Z", AllocationKind::Expense, dec!(50)),
            allocation("a", "A", AllocationKind::Expense, dec!(50)),
        ];
        let buckets = compute_buckets(&allocations, dec!(100), &totals(dec!(0), &[]));

        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_huge_base_income_saturates_instead_of_panicking() {
        let t = totals(dec!(0), &[("rent", dec!(25000))]);
        let bucket = compute_bucket(
            &allocation("rent", "Rent", AllocationKind::Expense, dec!(20)),
            Decimal::MAX,
            &t,
        );

        assert_eq!(bucket.budget_amount, Decimal::MAX / dec!(5));
        assert_eq!(bucket.variance_percent, dec!(-20));
        assert_eq!(bucket.status, VarianceStatus::Favorable);
    }

    #[test]
    fn test_tiny_base_income_zeroes_unrepresentable_percent() {
        let t = totals(dec!(0), &[("rent", Decimal::MAX)]);
        let bucket = compute_bucket(
            &allocation("rent", "Rent", AllocationKind::Expense, dec!(100)),
            dec!(0.0000000001),
            &t,
        );

        assert_eq!(bucket.variance_percent, Decimal::ZERO);
        assert_eq!(bucket.status, VarianceStatus::Unfavorable);
    }
}
