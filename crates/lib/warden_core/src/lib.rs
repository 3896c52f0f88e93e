//! # warden_core
//!
//! Core domain logic for Warden: password hashing, token issuance and
//! validation, the user store abstraction and the account workflows that
//! tie them together.

pub mod accounts;
pub mod auth;
pub mod migrate;
pub mod models;
pub mod seed;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
