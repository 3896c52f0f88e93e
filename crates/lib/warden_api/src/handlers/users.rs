//! User management request handlers. All routes here sit behind
//! [`require_auth`](crate::middleware::auth::require_auth).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use warden_core::models::user::{NewUser, User};

use super::require_uuid_v4;
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    CreateUserRequest, ListUsersQuery, MessageResponse, ResetPasswordRequest, UpdateUserRequest,
    UserPage, UserResponse,
};
use crate::validation::Validator;

/// Largest page `GET /api/v1/users/` will serve.
pub const MAX_PAGE_SIZE: i64 = 100;

/// `POST /api/v1/users/` — register a new user.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    Validator::new()
        .required("first_name", &body.first_name)
        .required("last_name", &body.last_name)
        .email("email", &body.email)
        .required("password", &body.password)
        .finish()?;

    let user = state
        .accounts
        .register(NewUser {
            first_name: body.first_name,
            last_name: body.last_name,
            full_name: body.full_name,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully".into(),
            user,
        }),
    ))
}

/// `GET /api/v1/users/?offset=&limit=` — page through users.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<UserPage>> {
    let offset = query.offset();
    let limit = query.limit();

    if offset < 0 {
        return Err(AppError::Validation("offset cannot be negative".into()));
    }
    if limit <= 0 || limit > MAX_PAGE_SIZE {
        return Err(AppError::Validation(format!(
            "limit cannot be negative, zero or greater than {MAX_PAGE_SIZE}"
        )));
    }

    let (users, total) = state.accounts.list_users(offset, limit).await?;
    Ok(Json(UserPage::new(users, total, offset, limit)))
}

/// `GET /api/v1/users/{id}` — fetch one user.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    require_uuid_v4(&id)?;
    let user = state.accounts.get_user(&id).await?;
    Ok(Json(UserResponse {
        message: "Get user".into(),
        user,
    }))
}

/// `PUT /api/v1/users/{id}` — update profile fields.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require_uuid_v4(&id)?;
    Validator::new()
        .required("first_name", &body.first_name)
        .required("last_name", &body.last_name)
        .email("email", &body.email)
        .finish()?;

    // Guarded fields are placeholders; the workflow restores them from the
    // stored record.
    let now = Utc::now();
    let user = state
        .accounts
        .update_user(User {
            id,
            first_name: body.first_name,
            last_name: body.last_name,
            full_name: body.full_name.unwrap_or_default(),
            email: body.email,
            password_hash: String::new(),
            active: true,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(Json(UserResponse {
        message: "User updated successfully".into(),
        user,
    }))
}

/// `DELETE /api/v1/users/{id}` — delete a user.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_uuid_v4(&id)?;
    state.accounts.delete_user(&id).await?;
    Ok(Json(MessageResponse::new("Delete user")))
}

/// `POST /api/v1/users/reset_password` — change the caller's own password.
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    require_uuid_v4(user.user_id())?;
    Validator::new()
        .required("old_password", &body.old_password)
        .required("new_password", &body.new_password)
        .required("confirm_new_password", &body.confirm_new_password)
        .finish()?;

    state
        .accounts
        .reset_password(user.user_id(), &body.old_password, &body.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password reset")))
}
