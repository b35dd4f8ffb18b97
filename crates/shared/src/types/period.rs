//! Reporting period helpers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range, included in full.
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    #[must_use]
    pub const fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Number of days covered, counting both endpoints. Never less than 1.
    #[must_use]
    pub fn inclusive_days(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(1)
    }

    /// Returns true if `date` falls within the range, both ends inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the end precedes the start.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }
}

/// Parses a strict `YYYY-MM-DD` date after trimming surrounding whitespace.
///
/// Rejects anything that is not exactly four digits, a dash, two digits, a dash
/// and two digits, as well as impossible calendar dates such as `2025-02-30`.
#[must_use]
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let bytes = input.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}
