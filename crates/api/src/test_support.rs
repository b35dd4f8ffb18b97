//! In-memory store and router harness for handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
    middleware::from_fn_with_state,
    response::Response,
};
use chrono::Utc;
use http_body_util::BodyExt;
use lifeplan_core::budget::{
    AllocationInput, AllocationKind, BudgetPlan, BudgetPlanDraft, LedgerEntry, NewTransaction,
    SaveBudgetPlanInput, Transaction,
};
use lifeplan_core::reports::ReportRenderer;
use lifeplan_core::store::{BudgetPlanStore, LedgerStore, StoreError};
use lifeplan_shared::types::{BudgetPlanId, DateRange, OwnerId, TransactionId};
use lifeplan_shared::{Claims, JwtConfig, JwtService, TokenCache};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{AppState, middleware::auth_middleware, routes};

/// Both stores over plain maps. Every trait call is counted.
#[derive(Default)]
pub struct InMemoryStore {
    plans: Mutex<HashMap<(OwnerId, i32), BudgetPlan>>,
    transactions: Mutex<Vec<Transaction>>,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn plan_count(&self) -> usize {
        self.plans.lock().unwrap().len()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BudgetPlanStore for InMemoryStore {
    async fn find_plan(&self, owner: OwnerId, year: i32) -> Result<Option<BudgetPlan>, StoreError> {
        self.touch();
        Ok(self.plans.lock().unwrap().get(&(owner, year)).cloned())
    }

    async fn save_plan(
        &self,
        owner: OwnerId,
        draft: BudgetPlanDraft,
    ) -> Result<BudgetPlan, StoreError> {
        self.touch();
        let now = Utc::now();
        let mut plans = self.plans.lock().unwrap();
        let previous = plans.get(&(owner, draft.year));
        let plan = BudgetPlan {
            id: Some(previous.and_then(|p| p.id).unwrap_or_else(BudgetPlanId::new)),
            owner,
            year: draft.year,
            currency: draft.currency,
            income_targets: draft.income_targets,
            allocations: draft.allocations,
            notes: draft.notes,
            created_at: Some(previous.and_then(|p| p.created_at).unwrap_or(now)),
            updated_at: Some(now),
        };
        plans.insert((owner, plan.year), plan.clone());
        Ok(plan)
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn transactions_in_range(
        &self,
        owner: OwnerId,
        range: DateRange,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        self.touch();
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.owner == owner && range.contains(t.date))
            .map(Transaction::ledger_entry)
            .collect())
    }

    async fn record_transaction(
        &self,
        owner: OwnerId,
        input: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        self.touch();
        let transaction = Transaction {
            id: TransactionId::new(),
            owner,
            date: input.date,
            kind: input.kind,
            amount: input.amount,
            category: input.category,
            description: input.description,
            account_name: input.account_name,
            mode: input.mode,
            created_at: Utc::now(),
        };
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(transaction)
    }

    async fn recent_transactions(
        &self,
        owner: OwnerId,
        limit: u64,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.touch();
        let limit = usize::try_from(limit).unwrap();
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|t| t.owner == owner)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Protected routes wired to an [`InMemoryStore`] with a signed-in owner.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub owner: OwnerId,
    pub token: String,
    pub verified_tokens: TokenCache<String, Claims>,
}

/// State over `store` with default JWT settings.
pub fn test_state(store: Arc<InMemoryStore>) -> AppState {
    AppState {
        plans: store.clone(),
        ledger: store,
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        verified_tokens: TokenCache::default(),
        reports: Arc::new(ReportRenderer::new().unwrap()),
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let state = test_state(store.clone());
        let owner = OwnerId::new();
        let token = state.jwt_service.generate_access_token(owner).unwrap();
        let verified_tokens = state.verified_tokens.clone();

        let router = Router::new()
            .merge(routes::budget::routes())
            .merge(routes::transactions::routes())
            .layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state);

        Self {
            router,
            store,
            owner,
            token,
            verified_tokens,
        }
    }

    pub async fn request_with_token(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"));
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request_with_token("POST", uri, &self.token, Some(body))
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        Self::json(self.post(uri, body).await).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        Self::json(
            self.request_with_token("PUT", uri, &self.token, Some(body))
                .await,
        )
        .await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        Self::json(self.request_with_token("GET", uri, &self.token, None).await).await
    }

    pub async fn post_json_without_token(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        Self::json(self.router.clone().oneshot(request).await.unwrap()).await
    }

    pub async fn text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let text = Self::text(response).await;
        (status, serde_json::from_str(&text).unwrap())
    }
}

/// Reads a decimal serialized as a JSON string.
pub fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

/// Monthly target 100000 split into profit 30, rent 20 and food 50.
pub fn rent_plan_input() -> SaveBudgetPlanInput {
    let bucket = |key: &str, label: &str, kind, percent| AllocationInput {
        key: Some(key.into()),
        label: Some(label.into()),
        kind: Some(kind),
        percent: Some(percent),
    };

    SaveBudgetPlanInput {
        year: Some(json!(2025)),
        currency: Some("INR".into()),
        income_target_monthly: Some(json!(100000)),
        allocations: vec![
            bucket("profit", "Profit Ratio", AllocationKind::Profit, dec!(30)),
            bucket("rent", "Rent", AllocationKind::Expense, dec!(20)),
            bucket("food", "Food", AllocationKind::Expense, dec!(50)),
        ],
        ..SaveBudgetPlanInput::default()
    }
}
