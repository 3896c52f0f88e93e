//! PostgreSQL user store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, UserStore};
use crate::models::user::User;

const INSERT_USER: &str = "INSERT INTO users (id, first_name, last_name, full_name, email, \
                           password_hash, active, created_at, updated_at) \
                           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)";

const SELECT_BY_ID: &str = "SELECT id, first_name, last_name, full_name, email, password_hash, \
                            active, created_at, updated_at FROM users \
                            WHERE id = $1 AND active = TRUE";

const SELECT_BY_EMAIL: &str = "SELECT id, first_name, last_name, full_name, email, \
                               password_hash, active, created_at, updated_at FROM users \
                               WHERE email = $1 AND active = TRUE LIMIT 1";

const COUNT_ACTIVE: &str = "SELECT COUNT(*) FROM users WHERE active = TRUE";

const SELECT_PAGE: &str = "SELECT id, first_name, last_name, full_name, email, password_hash, \
                           active, created_at, updated_at FROM users WHERE active = TRUE \
                           ORDER BY created_at DESC, id LIMIT $1 OFFSET $2";

const UPDATE_USER: &str = "UPDATE users SET first_name = $2, last_name = $3, full_name = $4, \
                           email = $5, password_hash = $6, active = $7, created_at = $8, \
                           updated_at = $9 WHERE id = $1";

const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

/// [`UserStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(INSERT_USER)
            .bind(&user.id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(SELECT_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_all(&self, offset: i64, limit: i64) -> Result<(Vec<User>, i64), StoreError> {
        let total = sqlx::query_scalar::<_, i64>(COUNT_ACTIVE)
            .fetch_one(&self.pool)
            .await?;
        let users = sqlx::query_as::<_, User>(SELECT_PAGE)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok((users, total))
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(UPDATE_USER)
            .bind(&user.id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(DELETE_USER)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
