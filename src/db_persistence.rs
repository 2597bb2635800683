use sqlx::postgres::PgPoolOptions;

use crate::repositories::{error_log::ErrorLogRepository, request_counter::RequestCounterRepository, DbResult};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(Debug, Clone)]
pub struct DbPersistence {
    pub request_counters: RequestCounterRepository,
    pub error_logs: ErrorLogRepository,
}

impl DbPersistence {
    pub async fn new(database_url: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new().max_connections(10).connect(database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let request_counters = RequestCounterRepository::new(&pool);
        let error_logs = ErrorLogRepository::new(&pool);

        Ok(Self {
            request_counters,
            error_logs,
        })
    }
}
