//! User persistence.
//!
//! [`UserStore`] is the only way the account workflows touch storage. The
//! SQL backends share one schema (see `migrations/`) and differ only in
//! dialect; [`MemoryUserStore`] backs tests and throwaway dev servers.

pub mod memory;
pub mod mysql;
pub mod postgres;

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::{MySqlPool, PgPool};
use thiserror::Error;

use crate::models::user::User;

pub use memory::MemoryUserStore;
pub use mysql::MySqlUserStore;
pub use postgres::PgUserStore;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("unsupported store driver: {0}")]
    UnsupportedDriver(String),
}

/// Durable record of users.
///
/// Lookups only see active users; `None` means "not found".
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    async fn create(&self, user: &User) -> Result<(), StoreError>;

    /// Fetch an active user by ID.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Fetch an active user by exact (case-sensitive) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Page through active users, newest first. Returns the page and the
    /// total number of active users.
    async fn find_all(&self, offset: i64, limit: i64) -> Result<(Vec<User>, i64), StoreError>;

    /// Overwrite every column of the user with matching ID.
    async fn update(&self, user: &User) -> Result<(), StoreError>;

    /// Delete a user. Returns `false` when no row matched.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Backing store dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreDriver {
    Postgres,
    MySql,
    Memory,
}

impl FromStr for StoreDriver {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(StoreError::UnsupportedDriver(other.to_string())),
        }
    }
}

impl std::fmt::Display for StoreDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::Memory => "memory",
        })
    }
}

/// A connected backend, created once at process start.
#[derive(Clone)]
pub enum StorePool {
    Postgres(PgPool),
    MySql(MySqlPool),
    Memory(Arc<MemoryUserStore>),
}

impl StorePool {
    /// Connect to the backend selected by `driver`. The URL is ignored for
    /// the in-memory store.
    pub async fn connect(
        driver: StoreDriver,
        url: &str,
        max_connections: u32,
        acquire_timeout: std::time::Duration,
    ) -> Result<Self, StoreError> {
        let pool = match driver {
            StoreDriver::Postgres => Self::Postgres(
                PgPoolOptions::new()
                    .max_connections(max_connections)
                    .acquire_timeout(acquire_timeout)
                    .connect(url)
                    .await?,
            ),
            StoreDriver::MySql => Self::MySql(
                MySqlPoolOptions::new()
                    .max_connections(max_connections)
                    .acquire_timeout(acquire_timeout)
                    .connect(url)
                    .await?,
            ),
            StoreDriver::Memory => Self::Memory(Arc::new(MemoryUserStore::new())),
        };
        Ok(pool)
    }

    pub fn driver(&self) -> StoreDriver {
        match self {
            Self::Postgres(_) => StoreDriver::Postgres,
            Self::MySql(_) => StoreDriver::MySql,
            Self::Memory(_) => StoreDriver::Memory,
        }
    }

    /// The [`UserStore`] view of this backend.
    pub fn user_store(&self) -> Arc<dyn UserStore> {
        match self {
            Self::Postgres(pool) => Arc::new(PgUserStore::new(pool.clone())),
            Self::MySql(pool) => Arc::new(MySqlUserStore::new(pool.clone())),
            Self::Memory(store) => store.clone(),
        }
    }
}
