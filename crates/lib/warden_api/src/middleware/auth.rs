//! Authentication middleware — Bearer token extraction and JWT verification.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use warden_core::auth::jwt::TokenService;
use warden_core::models::auth::TokenClaims;

use crate::AppState;
use crate::error::AppError;

/// Claims of the caller, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    /// The authenticated user's ID.
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the JWT,
/// and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Unauthorized("Authorization header missing".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AppError::Unauthorized("Invalid token".into()))?;

    let claims = state.accounts.tokens().validate(token)?;
    debug!(user_id = %claims.sub, "request authenticated");

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
