//! API server configuration.

use std::time::Duration;

use warden_core::auth::jwt::resolve_jwt_secret;
use warden_core::store::StoreDriver;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8080").
    pub bind_addr: String,
    /// Backing store dialect.
    pub db_driver: StoreDriver,
    /// Store connection URL / DSN.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Issuer embedded in every token.
    pub jwt_issuer: String,
    /// Upper bound on a single request, store calls included.
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable         | Default                             |
    /// |------------------|-------------------------------------|
    /// | `BIND_ADDR`      | `0.0.0.0:8080`                      |
    /// | `DB_TYPE`        | `postgres`                          |
    /// | `DB_DSN`         | `postgres://localhost:5432/warden`  |
    /// | `JWT_SECRET_KEY` | generated & persisted to file       |
    /// | `JWT_ISSUER`     | `warden`                            |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            db_driver: std::env::var("DB_TYPE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(StoreDriver::Postgres),
            database_url: std::env::var("DB_DSN")
                .unwrap_or_else(|_| "postgres://localhost:5432/warden".into()),
            jwt_secret: resolve_jwt_secret(),
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "warden".into()),
            request_timeout: Duration::from_secs(30),
        }
    }
}
