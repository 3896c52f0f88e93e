//! JWT token generation and verification.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{debug, info, warn};

use super::{AuthError, AuthResult};
use crate::models::auth::TokenClaims;

/// Access token lifetime: 24 hours.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Environment variable holding the signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET_KEY";

/// Issues and validates identity tokens.
pub trait TokenService: Send + Sync {
    /// Issue a signed token whose subject is `subject`.
    fn issue(&self, subject: &str) -> AuthResult<String>;

    /// Validate `token` and return its claims.
    ///
    /// Every failure mode is reported as [`AuthError::InvalidToken`].
    fn validate(&self, token: &str) -> AuthResult<TokenClaims>;
}

/// HMAC-signed JWTs with a fixed 24 hour lifetime.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
        }
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> AuthResult<String> {
        let claims = TokenClaims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = true;
        validation.leeway = 0;
        validation
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

fn is_hmac(alg: Algorithm) -> bool {
    matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &str) -> AuthResult<String> {
        self.issue_at(subject, Utc::now())
    }

    fn validate(&self, token: &str) -> AuthResult<TokenClaims> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "rejecting token with unreadable header");
            AuthError::InvalidToken
        })?;

        // Only the HMAC family may be used with a shared secret.
        if !is_hmac(header.alg) {
            warn!(alg = ?header.alg, "rejecting token signed with non-HMAC algorithm");
            return Err(AuthError::InvalidToken);
        }

        let data =
            decode::<TokenClaims>(token, &self.decoding, &Self::validation()).map_err(|e| {
                debug!(error = %e, "token failed verification");
                AuthError::InvalidToken
            })?;

        // Valid strictly before `exp`.
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}

/// Resolve the JWT secret: env var `JWT_SECRET_KEY` → persisted file → generated.
pub fn resolve_jwt_secret() -> String {
    resolve_jwt_secret_from(std::env::var(JWT_SECRET_ENV).ok(), &jwt_secret_path())
}

/// Secret resolution against an explicit env value and file location.
pub fn resolve_jwt_secret_from(env_value: Option<String>, secret_path: &Path) -> String {
    if let Some(secret) = env_value
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(existing) = std::fs::read_to_string(secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(secret_path, &secret) {
        warn!(path = %secret_path.display(), error = %e, "could not persist JWT secret");
    } else {
        info!(path = %secret_path.display(), "generated new JWT secret");
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("warden")
        .join("jwt-secret")
}
