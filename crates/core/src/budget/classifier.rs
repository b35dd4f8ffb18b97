//! Partitions ledger entries into inflow and outflow.

use rust_decimal::Decimal;

use super::types::{LedgerEntry, PeriodTotals};

/// Category used for outflow without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Trims and lowercases a category or bucket name.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Normalizes a transaction category, mapping blank values to [`UNCATEGORIZED`].
#[must_use]
pub fn normalize_category(category: Option<&str>) -> String {
    let normalized = normalize(category.unwrap_or_default());
    if normalized.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        normalized
    }
}

/// Aggregates entries that already fall inside the reporting period.
///
/// Inflow types add to `income`; outflow types add to `outflow` and to the
/// per-category map. `profit` is `income - outflow` and is not clamped.
/// Sums saturate at the `Decimal` bounds.
#[must_use]
pub fn classify_transactions<'a, I>(entries: I) -> PeriodTotals
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut totals = PeriodTotals::default();

    for entry in entries {
        totals.transaction_count += 1;

        if entry.kind.is_inflow() {
            totals.income = totals.income.saturating_add(entry.amount);
        } else if entry.kind.is_outflow() {
            totals.outflow = totals.outflow.saturating_add(entry.amount);
            let category = totals
                .outflow_by_category
                .entry(normalize_category(entry.category.as_deref()))
                .or_insert(Decimal::ZERO);
            *category = category.saturating_add(entry.amount);
        }
    }

    totals.profit = totals.income.saturating_sub(totals.outflow);
    totals
}
