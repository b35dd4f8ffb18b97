//! Ledger transaction routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use lifeplan_core::budget::{NewTransactionInput, validate_new_transaction};
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser, schema::INVALID_BODY};

/// Newest transactions returned by the list endpoint.
const RECENT_LIMIT: u64 = 100;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/accounting/transactions",
        get(list_transactions).post(create_transaction),
    )
}

/// GET `/accounting/transactions` - Newest transactions of the caller.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let transactions = state
        .ledger
        .recent_transactions(auth.user_id(), RECENT_LIMIT)
        .await
        .map_err(|e| ApiError::server("Failed to fetch transactions", e))?;

    Ok(Json(json!({ "success": true, "data": transactions })))
}

/// POST `/accounting/transactions` - Records one transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<NewTransactionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::validation(INVALID_BODY))?;
    let input = validate_new_transaction(input)?;

    let transaction = state
        .ledger
        .record_transaction(auth.user_id(), input)
        .await
        .map_err(|e| ApiError::server("Failed to create transaction", e))?;

    info!(
        transaction_id = %transaction.id,
        kind = transaction.kind.as_str(),
        "Transaction created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": transaction })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestApp, decimal};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_create_then_list() {
        let app = TestApp::new();

        let (status, created) = app
            .post_json(
                "/accounting/transactions",
                json!({
                    "type": "expense",
                    "amount": "2500.50",
                    "date": "2025-01-05",
                    "description": "  Groceries ",
                    "category": " Food ",
                    "mode": ""
                }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["type"], "expense");
        assert_eq!(created["data"]["description"], "Groceries");
        assert_eq!(created["data"]["category"], "Food");
        assert!(created["data"]["mode"].is_null());
        assert_eq!(decimal(&created["data"]["amount"]), dec!(2500.50));

        app.post_json(
            "/accounting/transactions",
            json!({ "type": "income", "amount": 90000, "date": "2025-01-01", "description": "Salary" }),
        )
        .await;

        let (status, listed) = app.get_json("/accounting/transactions").await;
        assert_eq!(status, StatusCode::OK);
        let rows = listed["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["description"], "Salary");
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let app = TestApp::new();
        let other = TestApp::new();

        other
            .post_json(
                "/accounting/transactions",
                json!({ "type": "emi", "amount": 1000, "date": "2025-01-01", "description": "Car" }),
            )
            .await;

        let (_, listed) = app.get_json("/accounting/transactions").await;
        assert!(listed["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_validation() {
        let app = TestApp::new();

        for (body, message) in [
            (
                json!({ "type": "expense", "amount": 10, "date": "2025-01-05", "description": "  " }),
                "Required fields missing",
            ),
            (
                json!({ "type": "expense", "amount": 0, "date": "2025-01-05", "description": "Tea" }),
                "Amount must be greater than zero",
            ),
            (
                json!({ "type": "expense", "amount": 10, "date": "05-01-2025", "description": "Tea" }),
                "Invalid startDate/endDate. Use YYYY-MM-DD.",
            ),
            (
                json!({ "type": "gift", "amount": 10, "date": "2025-01-05", "description": "Tea" }),
                INVALID_BODY,
            ),
        ] {
            let (status, json) = app.post_json("/accounting/transactions", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], message);
        }
        assert_eq!(app.store.calls(), 0);
    }
}
