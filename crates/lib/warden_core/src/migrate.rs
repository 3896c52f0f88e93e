//! Database migration support.
//!
//! Embeds and runs the SQL migrations under `warden_core/migrations/<dialect>`.

use tracing::info;

use crate::store::{StoreError, StorePool};

/// Run all embedded migrations for the pool's dialect. No-op for the
/// in-memory store.
pub async fn migrate(pool: &StorePool) -> Result<(), StoreError> {
    match pool {
        StorePool::Postgres(pg) => sqlx::migrate!("./migrations/postgres").run(pg).await?,
        StorePool::MySql(my) => sqlx::migrate!("./migrations/mysql").run(my).await?,
        StorePool::Memory(_) => {
            info!("in-memory store, skipping migrations");
            return Ok(());
        }
    }
    info!(driver = %pool.driver(), "database migration completed");
    Ok(())
}
