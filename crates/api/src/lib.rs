//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for budget plans, reports and transactions
//! - Authentication middleware
//! - The request schema boundary for report downloads
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;

#[cfg(test)]
mod test_support;

use axum::Router;
use lifeplan_core::reports::{ReportError, ReportRenderer};
use lifeplan_core::store::{BudgetPlanStore, LedgerStore};
use lifeplan_db::{BudgetPlanRepository, TransactionRepository};
use lifeplan_shared::{Claims, JwtService, TokenCache};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Budget plan storage.
    pub plans: Arc<dyn BudgetPlanStore>,
    /// Ledger storage.
    pub ledger: Arc<dyn LedgerStore>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Claims of recently verified bearer tokens, keyed by token.
    pub verified_tokens: TokenCache<String, Claims>,
    /// HTML report renderer.
    pub reports: Arc<ReportRenderer>,
}

impl AppState {
    /// Builds the state backed by the database repositories.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Render`] if the report templates do not load.
    pub fn from_database(
        db: DatabaseConnection,
        jwt_service: JwtService,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            plans: Arc::new(BudgetPlanRepository::new(db.clone())),
            ledger: Arc::new(TransactionRepository::new(db)),
            jwt_service: Arc::new(jwt_service),
            verified_tokens: TokenCache::default(),
            reports: Arc::new(ReportRenderer::new()?),
        })
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
