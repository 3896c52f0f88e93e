//! Request handlers.

pub mod auth;
pub mod users;

use crate::error::{AppError, AppResult};

/// Reject identifiers that are not version-4 UUIDs.
pub(crate) fn require_uuid_v4(id: &str) -> AppResult<()> {
    if warden_core::uuid::is_uuid_v4(id) {
        Ok(())
    } else {
        Err(AppError::Validation("invalid UUIDv4".into()))
    }
}
