//! Authentication and credential handling.
//!
//! Provides password hashing, JWT issuance/validation, and the error type
//! shared by every account workflow.

pub mod jwt;
pub mod password;

use thiserror::Error;

use crate::store::StoreError;

/// Authentication and account workflow errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Both cases share this variant.
    #[error("email or password is incorrect")]
    CredentialError,

    /// Malformed, forged, expired, or wrongly-signed token.
    #[error("invalid token")]
    InvalidToken,

    #[error("email already registered")]
    EmailAlreadyRegistered,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid old password")]
    InvalidOldPassword,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for account workflows.
pub type AuthResult<T> = Result<T, AuthError>;
