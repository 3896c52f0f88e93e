//! User domain models.
//!
//! `User` is the stored record. It serializes without its password hash, so
//! it can be handed straight to the HTTP layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration input. `password` is plaintext and never reaches a store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Returns `full_name` unless it is blank, otherwise `"{first} {last}"`.
pub fn display_name(full_name: &str, first_name: &str, last_name: &str) -> String {
    if full_name.trim().is_empty() {
        format!("{first_name} {last_name}")
    } else {
        full_name.to_string()
    }
}
