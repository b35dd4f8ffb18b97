//! Base income resolution.
//!
//! The base income is the figure every allocation percentage is applied
//! against for a reporting period.

use lifeplan_shared::types::DateRange;
use rust_decimal::Decimal;

use super::types::{BaseMode, IncomeTargets};

/// Periods up to this many days use the weekly target.
const WEEKLY_MAX_DAYS: i64 = 8;
/// Periods up to this many days use the monthly target.
const MONTHLY_MAX_DAYS: i64 = 35;
/// Periods of at least this many days use the full yearly target.
const FULL_YEAR_MIN_DAYS: i64 = 360;
/// Divisor for pro-rating the yearly target.
const DAYS_PER_YEAR: i64 = 365;

/// Resolves the base income for a period.
///
/// Precedence:
/// 1. a non-negative `override_amount`;
/// 2. `income_actual` in [`BaseMode::Actual`];
/// 3. in [`BaseMode::Target`], the weekly, monthly or (pro-rated) yearly
///    target chosen by period length, falling back to `income_actual` when no
///    positive target applies.
#[must_use]
pub fn compute_period_base_income(
    base_mode: BaseMode,
    targets: &IncomeTargets,
    income_actual: Decimal,
    range: &DateRange,
    override_amount: Option<Decimal>,
) -> Decimal {
    if let Some(amount) = override_amount.filter(|a| *a >= Decimal::ZERO) {
        return amount;
    }

    match base_mode {
        BaseMode::Actual => income_actual,
        BaseMode::Target => target_for_days(targets, range.inclusive_days()).unwrap_or(income_actual),
    }
}

fn target_for_days(targets: &IncomeTargets, days: i64) -> Option<Decimal> {
    if days <= WEEKLY_MAX_DAYS && targets.weekly > Decimal::ZERO {
        return Some(targets.weekly);
    }
    if days <= MONTHLY_MAX_DAYS && targets.monthly > Decimal::ZERO {
        return Some(targets.monthly);
    }
    if targets.yearly > Decimal::ZERO {
        if days >= FULL_YEAR_MIN_DAYS {
            return Some(targets.yearly);
        }
        let daily = targets.yearly / Decimal::from(DAYS_PER_YEAR);
        return Some(daily.saturating_mul(Decimal::from(days)));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(
            NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        )
    }

    fn targets(yearly: Decimal, monthly: Decimal, weekly: Decimal) -> IncomeTargets {
        IncomeTargets {
            yearly,
            monthly,
            weekly,
        }
    }

    #[test]
    fn test_override_wins_in_any_mode() {
        let t = targets(dec!(1200000), dec!(100000), dec!(25000));
        let r = range("2025-01-01", "2025-01-07");

        for mode in [BaseMode::Actual, BaseMode::Target] {
            assert_eq!(
                compute_period_base_income(mode, &t, dec!(5), &r, Some(dec!(42))),
                dec!(42)
            );
        }
    }

    #[test]
    fn test_zero_override_is_honored() {
        let t = targets(dec!(0), dec!(100000), dec!(0));
        let r = range("2025-01-01", "2025-01-30");

        assert_eq!(
            compute_period_base_income(BaseMode::Target, &t, dec!(5), &r, Some(dec!(0))),
            dec!(0)
        );
    }

    #[test]
    fn test_negative_override_is_ignored() {
        let t = IncomeTargets::default();
        let r = range("2025-01-01", "2025-01-30");

        assert_eq!(
            compute_period_base_income(BaseMode::Actual, &t, dec!(900), &r, Some(dec!(-1))),
            dec!(900)
        );
    }

    #[test]
    fn test_actual_mode_ignores_targets() {
        let t = targets(dec!(1200000), dec!(100000), dec!(25000));
        let r = range("2025-01-01", "2025-01-30");

        assert_eq!(
            compute_period_base_income(BaseMode::Actual, &t, dec!(77000), &r, None),
            dec!(77000)
        );
    }

    #[rstest]
    #[case("2025-01-01", "2025-01-07", dec!(25000))]
    #[case("2025-01-01", "2025-01-08", dec!(25000))]
    #[case("2025-01-01", "2025-01-09", dec!(100000))]
    #[case("2025-01-01", "2025-02-04", dec!(100000))]
    #[case("2025-01-01", "2025-12-31", dec!(1095000))]
    fn test_target_mode_picks_by_length(
        #[case] start: &str,
        #[case] end: &str,
        #[case] expected: Decimal,
    ) {
        let t = targets(dec!(1095000), dec!(100000), dec!(25000));
        assert_eq!(
            compute_period_base_income(BaseMode::Target, &t, dec!(1), &range(start, end), None),
            expected
        );
    }

    #[test]
    fn test_yearly_target_is_prorated_for_mid_length_periods() {
        let t = targets(dec!(365000), dec!(0), dec!(0));
        // 100 days
        let r = range("2025-01-01", "2025-04-10");

        assert_eq!(
            compute_period_base_income(BaseMode::Target, &t, dec!(1), &r, None),
            dec!(100000)
        );
    }

    #[test]
    fn test_short_period_falls_through_to_yearly_without_weekly_or_monthly() {
        let t = targets(dec!(365000), dec!(0), dec!(0));
        let r = range("2025-01-01", "2025-01-07");

        assert_eq!(
            compute_period_base_income(BaseMode::Target, &t, dec!(1), &r, None),
            dec!(7000)
        );
    }

    #[test]
    fn test_target_mode_without_targets_uses_actual() {
        let r = range("2025-01-01", "2025-01-30");

        assert_eq!(
            compute_period_base_income(
                BaseMode::Target,
                &IncomeTargets::default(),
                dec!(4321),
                &r,
                None
            ),
            dec!(4321)
        );
    }

    #[test]
    fn test_inverted_range_counts_as_one_day() {
        let t = targets(dec!(0), dec!(0), dec!(25000));
        let r = range("2025-01-10", "2025-01-01");

        assert_eq!(
            compute_period_base_income(BaseMode::Target, &t, dec!(1), &r, None),
            dec!(25000)
        );
    }

    #[test]
    fn test_prorated_yearly_target_stays_in_bounds() {
        let t = targets(Decimal::MAX, dec!(0), dec!(0));
        let r = range("2025-01-01", "2025-04-10");

        let base = compute_period_base_income(BaseMode::Target, &t, dec!(0), &r, None);

        assert!(base > dec!(0));
        assert!(base < Decimal::MAX);
    }
}
