//! Initial data: the admin account.

use tracing::info;

use crate::accounts::AccountService;
use crate::auth::{AuthError, AuthResult};
use crate::models::user::NewUser;

/// Credentials for the bootstrap admin account.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            email: "admin@admin.com".into(),
            password: "test@123".into(),
        }
    }
}

impl AdminSeed {
    /// Defaults overridden by `ADMIN_EMAIL` / `ADMIN_PASSWORD` when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            email: std::env::var("ADMIN_EMAIL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.email),
            password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.password),
        }
    }
}

/// Register the admin user. An already-registered email counts as success.
pub async fn seed_admin(accounts: &AccountService, seed: &AdminSeed) -> AuthResult<()> {
    let admin = NewUser {
        first_name: "User".into(),
        last_name: "Admin".into(),
        full_name: Some("User Admin".into()),
        email: seed.email.clone(),
        password: seed.password.clone(),
    };

    match accounts.register(admin).await {
        Ok(user) => info!(user_id = %user.id, email = %user.email, "admin user created"),
        Err(AuthError::EmailAlreadyRegistered) => {
            info!(email = %seed.email, "admin user already registered")
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::jwt::JwtTokenService;
    use crate::store::{MemoryUserStore, UserStore};

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let store = Arc::new(MemoryUserStore::new());
        let accounts = AccountService::new(
            store.clone(),
            Arc::new(JwtTokenService::new(b"seed-secret", "warden-test")),
        );
        let seed = AdminSeed::default();

        seed_admin(&accounts, &seed).await.unwrap();
        seed_admin(&accounts, &seed).await.unwrap();

        assert_eq!(store.len().await, 1);
        let admin = store.find_by_email("admin@admin.com").await.unwrap().unwrap();
        assert_eq!(admin.full_name, "User Admin");
        assert!(accounts.login("admin@admin.com", "test@123").await.is_ok());
    }
}
