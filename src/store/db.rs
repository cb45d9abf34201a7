use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::OnceCell;
use tracing::info;

use super::StoreError;

/// Process-wide connection pool, initialized lazily on first use.
///
/// Lazy initialization lets the server start (and the access gate operate)
/// without a reachable database; requests that need storage surface the
/// failure instead. A failed attempt leaves the cell empty so the next
/// request retries.
#[derive(Clone)]
pub struct Db {
    pool: Arc<OnceCell<PgPool>>,
    max_connections: u32,
}

impl Db {
    pub fn new(max_connections: u32) -> Self {
        Self {
            pool: Arc::new(OnceCell::new()),
            max_connections,
        }
    }

    pub async fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                let url = std::env::var("DATABASE_URL")
                    .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .connect(&url)
                    .await
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;

                info!("database pool created");
                Ok(pool)
            })
            .await
    }

    /// Ping the store; used by the health endpoint.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
