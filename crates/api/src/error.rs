//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lifeplan_core::budget::BudgetError;
use lifeplan_core::reports::ReportError;
use lifeplan_shared::AppError;
use serde_json::json;

/// Error returned by handlers, rendered as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// A 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// A 401.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self(AppError::Unauthorized("Unauthorized".to_string()))
    }

    /// Logs `err` and returns a 500 that only exposes `context`.
    pub fn server(context: &str, err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "{context}");
        Self(AppError::Internal(context.to_string()))
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        Self(err.into())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.0.message() }))).into_response()
    }
}
