//! Report error types.

use chrono::NaiveDate;
use lifeplan_shared::AppError;
use thiserror::Error;

/// Errors that can occur while preparing a report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// The requested report kind does not exist.
    #[error("Unsupported downloadType")]
    UnsupportedKind(String),

    /// The period ends before it starts.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A template failed to load or render.
    #[error("Failed to render report: {0}")]
    Render(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Render(_) => Self::Internal(err.to_string()),
            other => Self::Validation(other.to_string()),
        }
    }
}
