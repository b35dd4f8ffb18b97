//! Money formatting helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole currency units; halves round toward positive infinity.
#[must_use]
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.saturating_add(Decimal::new(5, 1)).floor()
}

/// Formats an amount as `"{currency} {grouped whole units}"`, e.g. `INR 12,345`.
#[must_use]
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let rounded = round_half_up(amount);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{currency} {sign}{}", group_thousands(&digits))
}

/// Formats a percentage with exactly two decimals, e.g. `12.50`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Ratio of `part` to `whole` as a percentage.
///
/// Zero when `whole` is not positive or the ratio does not fit a `Decimal`.
#[must_use]
pub fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_default()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
