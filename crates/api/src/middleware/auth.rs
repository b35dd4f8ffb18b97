//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use lifeplan_shared::types::OwnerId;
use lifeplan_shared::{CachedToken, Claims, JwtError};

use crate::AppState;
use crate::error::ApiError;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates JWT tokens.
///
/// Valid claims are stored in the request extensions; anything else is
/// answered with 401 before the handler runs. Verified claims are cached per
/// token until shortly before the token expires.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        tracing::debug!("Missing bearer token");
        return ApiError::unauthorized().into_response();
    };

    let verified = state
        .verified_tokens
        .get_or_refresh(token.to_string(), || async {
            let claims = state.jwt_service.validate_token(token)?;
            Ok::<_, JwtError>(CachedToken {
                expires_at: claims.expires_at(),
                value: claims,
            })
        })
        .await;

    match verified {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            match e.as_ref() {
                JwtError::Expired => tracing::debug!("Expired token"),
                other => tracing::debug!(error = %other, "Rejected token"),
            }
            ApiError::unauthorized().into_response()
        }
    }
}

/// Extractor for authenticated user claims.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let owner = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the owner ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> OwnerId {
        self.0.owner_id()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(ApiError::unauthorized)
    }
}
