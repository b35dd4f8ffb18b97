//! Report kinds and download file names.

use std::fmt;
use std::str::FromStr;

use lifeplan_shared::types::DateRange;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// A downloadable report document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Snapshot of the saved plan.
    Budget,
    /// Static budgeting guide.
    Guide,
    /// Actual income and outflow for a period.
    Reality,
    /// Budget vs actual per bucket.
    Variance,
}

impl ReportKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Guide => "guide",
            Self::Reality => "reality",
            Self::Variance => "variance",
        }
    }

    /// Whether a download request must carry a valid date range.
    ///
    /// Only the guide is exempt. The plan snapshot does not use the range but
    /// still requires it.
    #[must_use]
    pub const fn needs_range(self) -> bool {
        !matches!(self, Self::Guide)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "budget" => Ok(Self::Budget),
            "guide" => Ok(Self::Guide),
            "reality" => Ok(Self::Reality),
            "variance" => Ok(Self::Variance),
            other => Err(ReportError::UnsupportedKind(other.to_string())),
        }
    }
}

/// File name offered for a downloaded report.
///
/// Range-based reports embed the period; `range` is ignored for the others.
#[must_use]
pub fn report_filename(kind: ReportKind, year: i32, range: Option<&DateRange>) -> String {
    match (kind, range) {
        (ReportKind::Budget, _) => format!("budget-plan-{year}.html"),
        (ReportKind::Guide, _) => format!("budget-guide-{year}.html"),
        (ReportKind::Reality | ReportKind::Variance, Some(r)) => format!(
            "budget-{kind}-{year}-{}_to_{}.html",
            r.start_date.format("%Y-%m-%d"),
            r.end_date.format("%Y-%m-%d")
        ),
        (ReportKind::Reality | ReportKind::Variance, None) => format!("budget-{kind}-{year}.html"),
    }
}
