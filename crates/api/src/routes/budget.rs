//! Budget plan, variance report and download routes.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{
        HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use lifeplan_core::budget::{
    BudgetError, BudgetPlan, BudgetReport, BudgetService, SaveBudgetPlanInput, default_plan,
    validate_plan,
};
use lifeplan_core::reports::report_filename;
use lifeplan_shared::types::OwnerId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    middleware::AuthUser,
    schema::{DownloadRequest, INVALID_BODY, PeriodQuery, parse_download, parse_report, parse_year},
};

const DOWNLOAD_FAILED: &str = "Failed to generate download";
const REPORT_FAILED: &str = "Failed to generate budget report";

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounting/budget", get(get_plan).put(save_plan))
        .route("/accounting/budget/report", post(budget_report))
        .route("/accounting/budget/download", post(download))
}

/// Query for `GET /accounting/budget`.
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    /// Plan year, defaults to the current year.
    pub year: Option<String>,
}

/// Report metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    /// Transactions inside the range.
    pub transactions_count: usize,
    /// Day the report was computed.
    pub generated_at: NaiveDate,
}

/// Body of the JSON variance report.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Computed report.
    #[serde(flatten)]
    pub report: BudgetReport,
    /// Report metadata.
    pub meta: ReportMeta,
}

fn current_year() -> i32 {
    Utc::now().year()
}

async fn load_plan(
    state: &AppState,
    owner: OwnerId,
    year: i32,
    context: &str,
) -> Result<BudgetPlan, ApiError> {
    state
        .plans
        .find_plan(owner, year)
        .await
        .map_err(|e| ApiError::server(context, e))?
        .ok_or_else(|| BudgetError::PlanNotFound.into())
}

async fn compute(
    state: &AppState,
    owner: OwnerId,
    query: &PeriodQuery,
    context: &str,
) -> Result<BudgetReport, ApiError> {
    let plan = load_plan(state, owner, query.year, context).await?;
    let entries = state
        .ledger
        .transactions_in_range(owner, query.range)
        .await
        .map_err(|e| ApiError::server(context, e))?;

    Ok(BudgetService::compute_report(
        &plan,
        &entries,
        query.range,
        query.base_mode,
        query.base_income,
    ))
}

/// GET `/accounting/budget` - Returns the saved plan or the default one.
async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<PlanQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::from(BudgetError::InvalidYear))?;
    let raw = query.year.map(Value::String);
    let year = parse_year(raw.as_ref(), current_year())?;
    let owner = auth.user_id();

    let plan = state
        .plans
        .find_plan(owner, year)
        .await
        .map_err(|e| ApiError::server("Failed to fetch budget plan", e))?
        .unwrap_or_else(|| default_plan(owner, year));

    Ok(Json(json!({ "success": true, "data": plan })))
}

/// PUT `/accounting/budget` - Validates and upserts the plan for its year.
async fn save_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<SaveBudgetPlanInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::validation(INVALID_BODY))?;
    let draft = validate_plan(input)?;

    let plan = state
        .plans
        .save_plan(auth.user_id(), draft)
        .await
        .map_err(|e| ApiError::server("Failed to save budget plan", e))?;

    info!(
        owner_id = %auth.user_id(),
        year = plan.year,
        buckets = plan.allocations.len(),
        "Budget plan saved"
    );

    Ok(Json(json!({ "success": true, "data": plan })))
}

/// POST `/accounting/budget/report` - Budget vs actual as JSON.
async fn budget_report(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::validation(INVALID_BODY))?;
    let query = parse_report(body, current_year())?;

    let report = compute(&state, auth.user_id(), &query, REPORT_FAILED).await?;
    let meta = ReportMeta {
        transactions_count: report.totals.transaction_count,
        generated_at: Utc::now().date_naive(),
    };

    Ok(Json(json!({
        "success": true,
        "data": ReportResponse { report, meta },
    })))
}

/// POST `/accounting/budget/download` - One of the HTML reports as an attachment.
async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::validation(INVALID_BODY))?;
    let request = parse_download(body, current_year())?;
    let owner = auth.user_id();
    let generated_at = Utc::now();

    let reports = &state.reports;
    let (rendered, range) = match &request {
        DownloadRequest::Guide { .. } => (reports.guide(generated_at), None),
        DownloadRequest::Budget { year } => {
            let plan = load_plan(&state, owner, *year, DOWNLOAD_FAILED).await?;
            (reports.budget_plan(&plan, generated_at), None)
        }
        DownloadRequest::Reality(query) => {
            let report = compute(&state, owner, query, DOWNLOAD_FAILED).await?;
            (reports.reality(&report, generated_at), Some(query.range))
        }
        DownloadRequest::Variance(query) => {
            let report = compute(&state, owner, query, DOWNLOAD_FAILED).await?;
            (reports.variance(&report, generated_at), Some(query.range))
        }
    };
    let html = rendered.map_err(|e| ApiError::server(DOWNLOAD_FAILED, e))?;

    let filename = report_filename(request.kind(), request.year(), range.as_ref());
    info!(owner_id = %owner, kind = %request.kind(), %filename, "Report downloaded");

    html_attachment(html, &filename, generated_at)
}

fn html_attachment(
    html: String,
    filename: &str,
    generated_at: DateTime<Utc>,
) -> Result<Response, ApiError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| ApiError::server(DOWNLOAD_FAILED, e))?;

    tracing::debug!(bytes = html.len(), %generated_at, "Rendered report");

    Ok((
        StatusCode::OK,
        [
            (
                CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
            (CONTENT_DISPOSITION, disposition),
            (CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
        html,
    )
        .into_response())
}
