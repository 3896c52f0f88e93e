//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{LoginRequest, LoginResponse};
use crate::validation::Validator;

/// `POST /api/v1/auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    Validator::new()
        .required("email", &body.email)
        .required("password", &body.password)
        .finish()?;

    let token = state.accounts.login(&body.email, &body.password).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token,
    }))
}
