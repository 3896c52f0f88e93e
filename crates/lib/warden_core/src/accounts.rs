//! Account workflows: login, registration, password reset and profile
//! maintenance.
//!
//! Registration checks email uniqueness with a lookup followed by an insert.
//! The two calls are not atomic, so two concurrent registrations for the
//! same email can both succeed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::auth::jwt::TokenService;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthError, AuthResult};
use crate::models::user::{NewUser, User, display_name};
use crate::store::UserStore;
use crate::uuid::new_user_id;

/// Orchestrates the user store, credential hasher and token service.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<dyn TokenService>) -> Self {
        Self { store, tokens }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenService> {
        &self.tokens
    }

    /// Authenticate with email + password and return a signed token.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<String> {
        let Some(user) = self.store.find_by_email(email).await? else {
            debug!("login for unknown email");
            return Err(AuthError::CredentialError);
        };

        if !verify_password(password, &user.password_hash) {
            debug!(user_id = %user.id, "login with wrong password");
            return Err(AuthError::CredentialError);
        }

        let token = self.tokens.issue(&user.id)?;
        info!(user_id = %user.id, "login succeeded");
        Ok(token)
    }

    /// Register a new user. The plaintext password is hashed before the
    /// record reaches the store.
    pub async fn register(&self, new_user: NewUser) -> AuthResult<User> {
        if self.store.find_by_email(&new_user.email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let password_hash = hash_password(&new_user.password)?;
        let now = Utc::now();
        let full_name = display_name(
            new_user.full_name.as_deref().unwrap_or_default(),
            &new_user.first_name,
            &new_user.last_name,
        );
        let user = User {
            id: new_user_id(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            full_name,
            email: new_user.email,
            password_hash,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.store.create(&user).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Fetch an active user by ID.
    pub async fn get_user(&self, id: &str) -> AuthResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Page through active users. Returns the page and the total count.
    pub async fn list_users(&self, offset: i64, limit: i64) -> AuthResult<(Vec<User>, i64)> {
        if offset < 0 {
            return Err(AuthError::Validation("offset cannot be negative".into()));
        }
        if limit <= 0 {
            return Err(AuthError::Validation("limit must be positive".into()));
        }
        Ok(self.store.find_all(offset, limit).await?)
    }

    /// Overwrite a user's profile fields.
    ///
    /// `created_at`, `password_hash` and `active` always come from the stored
    /// record, whatever the payload carries.
    pub async fn update_user(&self, mut user: User) -> AuthResult<User> {
        let existing = self.get_user(&user.id).await?;

        user.created_at = existing.created_at;
        user.password_hash = existing.password_hash;
        user.active = true;
        user.full_name = display_name(&user.full_name, &user.first_name, &user.last_name);
        user.updated_at = Utc::now();

        self.store.update(&user).await?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    /// Delete a user by ID.
    pub async fn delete_user(&self, id: &str) -> AuthResult<()> {
        if !self.store.delete(id).await? {
            return Err(AuthError::UserNotFound);
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Replace a user's password after checking the current one.
    ///
    /// `user_id` must come from an already-validated token.
    pub async fn reset_password(
        &self,
        user_id: &str,
        old_password: &str,
        new_password: &str,
    ) -> AuthResult<()> {
        let mut user = self.get_user(user_id).await?;

        if !verify_password(old_password, &user.password_hash) {
            return Err(AuthError::InvalidOldPassword);
        }

        user.password_hash = hash_password(new_password)?;
        user.updated_at = Utc::now();
        self.store.update(&user).await?;
        info!(user_id = %user.id, "password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::auth::jwt::JwtTokenService;
    use crate::store::MemoryUserStore;

    struct Harness {
        store: Arc<MemoryUserStore>,
        tokens: Arc<JwtTokenService>,
        service: AccountService,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryUserStore::new());
        let tokens = Arc::new(JwtTokenService::new(b"unit-secret", "warden-test"));
        let service = AccountService::new(store.clone(), tokens.clone());
        Harness {
            store,
            tokens,
            service,
        }
    }

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            full_name: None,
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn register_hashes_password_and_derives_full_name() {
        let h = harness();
        let user = h.service.register(new_user("a@x.com", "p1")).await.unwrap();

        assert!(crate::uuid::is_uuid_v4(&user.id));
        assert_eq!(user.full_name, "Ada Lovelace");
        assert!(user.active);
        assert_ne!(user.password_hash, "p1");
        assert!(verify_password("p1", &user.password_hash));

        let stored = h.store.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn register_keeps_explicit_full_name() {
        let h = harness();
        let mut input = new_user("a@x.com", "p1");
        input.full_name = Some("Countess of Lovelace".into());
        let user = h.service.register(input).await.unwrap();
        assert_eq!(user.full_name, "Countess of Lovelace");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_without_touching_existing() {
        let h = harness();
        let first = h.service.register(new_user("a@x.com", "p1")).await.unwrap();

        let err = h
            .service
            .register(new_user("a@x.com", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyRegistered));

        assert_eq!(h.store.len().await, 1);
        let stored = h.store.find_by_id(&first.id).await.unwrap().unwrap();
        assert_eq!(stored, first);
    }

    #[tokio::test]
    async fn email_uniqueness_is_case_sensitive() {
        let h = harness();
        h.service.register(new_user("a@x.com", "p1")).await.unwrap();
        assert!(h.service.register(new_user("A@x.com", "p1")).await.is_ok());
    }

    #[tokio::test]
    async fn login_issues_token_for_subject() {
        let h = harness();
        let user = h.service.register(new_user("a@x.com", "p1")).await.unwrap();

        let token = h.service.login("a@x.com", "p1").await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(h.tokens.validate(&token).unwrap().sub, user.id);
    }

    #[tokio::test]
    async fn login_errors_are_indistinguishable() {
        let h = harness();
        h.service.register(new_user("a@x.com", "p1")).await.unwrap();

        let wrong_password = h.service.login("a@x.com", "wrong").await.unwrap_err();
        let unknown_email = h.service.login("nobody@x.com", "p1").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::CredentialError));
        assert!(matches!(unknown_email, AuthError::CredentialError));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn login_ignores_inactive_users() {
        let h = harness();
        let mut user = h.service.register(new_user("a@x.com", "p1")).await.unwrap();
        user.active = false;
        h.store.update(&user).await.unwrap();

        let err = h.service.login("a@x.com", "p1").await.unwrap_err();
        assert!(matches!(err, AuthError::CredentialError));
    }

    #[tokio::test]
    async fn update_preserves_guarded_fields() {
        let h = harness();
        let original = h.service.register(new_user("a@x.com", "p1")).await.unwrap();

        let payload = User {
            id: original.id.clone(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            full_name: String::new(),
            email: "grace@x.com".into(),
            password_hash: "attacker-chosen".into(),
            active: false,
            created_at: Utc::now() + Duration::days(365),
            updated_at: original.updated_at,
        };
        let updated = h.service.update_user(payload).await.unwrap();

        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.password_hash, original.password_hash);
        assert!(updated.active);
        assert_eq!(updated.full_name, "Grace Hopper");
        assert_eq!(updated.email, "grace@x.com");
        assert!(updated.updated_at >= original.updated_at);

        let stored = h.store.find_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert!(verify_password("p1", &stored.password_hash));
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let h = harness();
        let now = Utc::now();
        let payload = User {
            id: new_user_id(),
            first_name: "X".into(),
            last_name: "Y".into(),
            full_name: String::new(),
            email: "x@y.com".into(),
            password_hash: String::new(),
            active: true,
            created_at: now,
            updated_at: now,
        };
        let err = h.service.update_user(payload).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn reset_with_wrong_old_password_changes_nothing() {
        let h = harness();
        let user = h.service.register(new_user("a@x.com", "p1")).await.unwrap();

        let err = h
            .service
            .reset_password(&user.id, "wrong", "p2")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidOldPassword));

        let stored = h.store.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn reset_with_correct_old_password_rotates_hash() {
        let h = harness();
        let user = h.service.register(new_user("a@x.com", "p1")).await.unwrap();

        h.service.reset_password(&user.id, "p1", "p2").await.unwrap();

        let stored = h.store.find_by_id(&user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, user.password_hash);
        assert!(verify_password("p2", &stored.password_hash));
        assert!(!verify_password("p1", &stored.password_hash));
        assert!(h.service.login("a@x.com", "p2").await.is_ok());
        assert!(h.service.login("a@x.com", "p1").await.is_err());
    }

    #[tokio::test]
    async fn reset_allows_reusing_the_old_password() {
        let h = harness();
        let user = h.service.register(new_user("a@x.com", "p1")).await.unwrap();
        h.service.reset_password(&user.id, "p1", "p1").await.unwrap();
        assert!(h.service.login("a@x.com", "p1").await.is_ok());
    }

    #[tokio::test]
    async fn reset_for_unknown_user_is_not_found() {
        let h = harness();
        let err = h
            .service
            .reset_password(&new_user_id(), "p1", "p2")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let h = harness();
        let user = h.service.register(new_user("a@x.com", "p1")).await.unwrap();

        h.service.delete_user(&user.id).await.unwrap();
        assert!(matches!(
            h.service.get_user(&user.id).await.unwrap_err(),
            AuthError::UserNotFound
        ));
        assert!(matches!(
            h.service.delete_user(&user.id).await.unwrap_err(),
            AuthError::UserNotFound
        ));
    }

    #[tokio::test]
    async fn list_rejects_bad_window() {
        let h = harness();
        assert!(matches!(
            h.service.list_users(-1, 10).await.unwrap_err(),
            AuthError::Validation(_)
        ));
        assert!(matches!(
            h.service.list_users(0, 0).await.unwrap_err(),
            AuthError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn list_returns_total_across_pages() {
        let h = harness();
        for i in 0..3 {
            h.service
                .register(new_user(&format!("{i}@x.com"), "p"))
                .await
                .unwrap();
        }
        let (page, total) = h.service.list_users(0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(total, 3);
    }
}
