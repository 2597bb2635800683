use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    db_persistence::DbError,
    models::request_counter::CounterField,
    repositories::DbResult,
};

/// Per-day request and upsell tallies. Increments commute, so concurrent callers never race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestCounterStore: Send + Sync {
    async fn increment(&self, day: NaiveDate, field: CounterField) -> DbResult<()>;
}

#[derive(Debug, Clone)]
pub struct RequestCounterRepository {
    pool: PgPool,
}

impl RequestCounterRepository {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait]
impl RequestCounterStore for RequestCounterRepository {
    async fn increment(&self, day: NaiveDate, field: CounterField) -> DbResult<()> {
        let column = field.column();
        let query = format!(
            "INSERT INTO request_counters (day, {column})
             VALUES ($1, 1)
             ON CONFLICT (day) DO UPDATE
             SET {column} = request_counters.{column} + 1, updated_at = NOW()"
        );

        sqlx::query(&query)
            .bind(day)
            .execute(&self.pool)
            .await
            .map_err(DbError::Database)?;

        Ok(())
    }
}
