use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the append-only `activity_log` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLogEntry {
    pub id: Uuid,
    /// Insertion order; breaks ties between identical timestamps.
    pub seq: i64,
    pub user_id: Uuid,
    pub user_email: String,
    pub user_display_name: String,
    pub feature: String,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller; id, seq and timestamp are assigned on append.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: Uuid,
    pub user_email: String,
    pub user_display_name: String,
    pub feature: String,
    pub action: String,
    pub details: String,
}
