use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    pub id: Uuid,
    pub body: serde_json::Value,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ErrorLogEntry {
    pub fn new(body: serde_json::Value, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            body,
            message,
            created_at: Utc::now(),
        }
    }
}
