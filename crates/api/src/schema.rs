//! Request parsing for the report and download endpoints.
//!
//! Bodies are read as loose JSON and narrowed into typed requests here, so
//! handlers only ever see validated values.

use std::str::FromStr;

use lifeplan_core::budget::{BaseMode, BudgetError, json_decimal, year_from_json};
use lifeplan_core::reports::{ReportError, ReportKind};
use lifeplan_shared::types::{DateRange, parse_iso_date};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// Message for bodies that are not a JSON object of the expected shape.
pub const INVALID_BODY: &str = "Invalid request body";

/// Largest `baseIncome` override kept (10^15); larger values are dropped.
const MAX_BASE_INCOME: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// A validated reporting period request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodQuery {
    /// Plan year.
    pub year: i32,
    /// Inclusive reporting range.
    pub range: DateRange,
    /// Base income mode.
    pub base_mode: BaseMode,
    /// Explicit base income, if one was supplied.
    pub base_income: Option<Decimal>,
}

/// A validated download request, one variant per report kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadRequest {
    /// The saved plan.
    Budget {
        /// Plan year.
        year: i32,
    },
    /// The static guide.
    Guide {
        /// Year used in the file name.
        year: i32,
    },
    /// Period actuals.
    Reality(PeriodQuery),
    /// Budget vs actual.
    Variance(PeriodQuery),
}

impl DownloadRequest {
    /// Report kind of the request.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::Budget { .. } => ReportKind::Budget,
            Self::Guide { .. } => ReportKind::Guide,
            Self::Reality(_) => ReportKind::Reality,
            Self::Variance(_) => ReportKind::Variance,
        }
    }

    /// Requested plan year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        match self {
            Self::Budget { year } | Self::Guide { year } => *year,
            Self::Reality(q) | Self::Variance(q) => q.year,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReportBody {
    #[serde(default)]
    download_type: Option<Value>,
    #[serde(default)]
    year: Option<Value>,
    #[serde(default)]
    start_date: Option<Value>,
    #[serde(default)]
    end_date: Option<Value>,
    #[serde(default)]
    base_mode: Option<Value>,
    #[serde(default)]
    base_income: Option<Value>,
}

impl RawReportBody {
    fn from_value(body: Value) -> Result<Self, ApiError> {
        if !body.is_object() {
            return Err(ApiError::validation(INVALID_BODY));
        }
        serde_json::from_value(body).map_err(|_| ApiError::validation(INVALID_BODY))
    }

    fn range(&self) -> Result<DateRange, ApiError> {
        let range = DateRange::new(
            date_field(self.start_date.as_ref())?,
            date_field(self.end_date.as_ref())?,
        );
        if range.is_inverted() {
            return Err(ReportError::InvalidDateRange {
                start: range.start_date,
                end: range.end_date,
            }
            .into());
        }
        Ok(range)
    }

    fn period(&self, year: i32, range: DateRange) -> PeriodQuery {
        PeriodQuery {
            year,
            range,
            base_mode: base_mode_field(self.base_mode.as_ref()),
            base_income: base_income_field(self.base_income.as_ref()),
        }
    }
}

/// Parses a `POST /accounting/budget/download` body.
///
/// The year is checked first, then `downloadType`, then the dates for every
/// kind except the guide.
///
/// # Errors
///
/// Returns a validation error for a malformed body, an out-of-range year, an
/// unknown or missing `downloadType`, or bad dates.
pub fn parse_download(body: Value, default_year: i32) -> Result<DownloadRequest, ApiError> {
    let raw = RawReportBody::from_value(body)?;

    let year = parse_year(raw.year.as_ref(), default_year)?;
    let kind = match raw.download_type.as_ref() {
        Some(Value::String(s)) => ReportKind::from_str(s)?,
        _ => return Err(ReportError::UnsupportedKind(String::new()).into()),
    };
    let range = kind.needs_range().then(|| raw.range()).transpose()?;

    Ok(match (kind, range) {
        (ReportKind::Budget, _) => DownloadRequest::Budget { year },
        (ReportKind::Guide, _) => DownloadRequest::Guide { year },
        (ReportKind::Reality, Some(range)) => DownloadRequest::Reality(raw.period(year, range)),
        (ReportKind::Variance, Some(range)) => DownloadRequest::Variance(raw.period(year, range)),
        (ReportKind::Reality | ReportKind::Variance, None) => {
            return Err(BudgetError::InvalidDate.into());
        }
    })
}

/// Parses a `POST /accounting/budget/report` body.
///
/// # Errors
///
/// Returns a validation error for a malformed body, an out-of-range year or
/// bad dates.
pub fn parse_report(body: Value, default_year: i32) -> Result<PeriodQuery, ApiError> {
    let raw = RawReportBody::from_value(body)?;
    let year = parse_year(raw.year.as_ref(), default_year)?;
    let range = raw.range()?;
    Ok(raw.period(year, range))
}

/// Resolves a year given as a JSON number or numeric string.
///
/// Absent or `null` falls back to `default_year`.
///
/// # Errors
///
/// Returns [`BudgetError::InvalidYear`] for anything else or a year outside
/// the supported range.
pub fn parse_year(value: Option<&Value>, default_year: i32) -> Result<i32, BudgetError> {
    match value {
        None | Some(Value::Null) => year_from_json(&Value::from(default_year)),
        Some(v) => year_from_json(v),
    }
}

fn date_field(value: Option<&Value>) -> Result<chrono::NaiveDate, BudgetError> {
    value
        .and_then(Value::as_str)
        .and_then(parse_iso_date)
        .ok_or(BudgetError::InvalidDate)
}

// Anything other than "target" selects actual income.
fn base_mode_field(value: Option<&Value>) -> BaseMode {
    match value.and_then(Value::as_str).map(str::trim) {
        Some("target") => BaseMode::Target,
        _ => BaseMode::Actual,
    }
}

// Unparseable or oversized overrides are dropped, not rejected.
fn base_income_field(value: Option<&Value>) -> Option<Decimal> {
    json_decimal(value?).filter(|d| *d <= MAX_BASE_INCOME)
}
