//! # warden_api
//!
//! HTTP API library for Warden.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use warden_core::accounts::AccountService;
use warden_core::auth::jwt::JwtTokenService;
use warden_core::store::UserStore;

use crate::config::ApiConfig;
use crate::handlers::{auth, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account workflows over the configured store and token service.
    pub accounts: AccountService,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Wire the JWT token service from `config` to `store`.
    pub fn new(store: Arc<dyn UserStore>, config: ApiConfig) -> Self {
        let tokens = Arc::new(JwtTokenService::new(
            config.jwt_secret.as_bytes(),
            config.jwt_issuer.clone(),
        ));
        Self {
            accounts: AccountService::new(store, tokens),
            config,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new().route(routes::POST_AUTH_LOGIN, post(auth::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(
            routes::USERS,
            post(users::create_user_handler).get(users::list_users_handler),
        )
        .route(
            routes::USERS_SLASH,
            post(users::create_user_handler).get(users::list_users_handler),
        )
        .route(
            routes::POST_USERS_RESET_PASSWORD,
            post(users::reset_password_handler),
        )
        .route(
            routes::USERS_ID,
            get(users::get_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
