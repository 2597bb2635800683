use async_trait::async_trait;
use sqlx::PgPool;

use crate::{db_persistence::DbError, models::error_log::ErrorLogEntry, repositories::DbResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ErrorLogStore: Send + Sync {
    async fn record(&self, entry: &ErrorLogEntry) -> DbResult<()>;
}

#[derive(Debug, Clone)]
pub struct ErrorLogRepository {
    pool: PgPool,
}

impl ErrorLogRepository {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait]
impl ErrorLogStore for ErrorLogRepository {
    async fn record(&self, entry: &ErrorLogEntry) -> DbResult<()> {
        sqlx::query("INSERT INTO error_logs (id, body, message, created_at) VALUES ($1, $2, $3, $4)")
            .bind(entry.id)
            .bind(&entry.body)
            .bind(&entry.message)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(DbError::Database)?;

        Ok(())
    }
}
