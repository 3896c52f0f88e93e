//! In-memory user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, UserStore};
use crate::models::user::User;

/// `HashMap`-backed [`UserStore`] with the same visibility rules as the SQL
/// stores.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users, active or not.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .get(id)
            .filter(|u| u.active)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.active && u.email == email)
            .cloned())
    }

    async fn find_all(&self, offset: i64, limit: i64) -> Result<(Vec<User>, i64), StoreError> {
        let users = self.users.read().await;
        let mut active: Vec<&User> = users.values().filter(|u| u.active).collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        let total = active.len() as i64;
        let page = active
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        // Unknown IDs are left alone, matching `UPDATE ... WHERE id = ?`.
        if let Some(slot) = self.users.write().await.get_mut(&user.id) {
            *slot = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.users.write().await.remove(id).is_some())
    }
}
