use crate::db_persistence::DbError;

pub type DbResult<T> = Result<T, DbError>;

pub mod error_log;
pub mod request_counter;
