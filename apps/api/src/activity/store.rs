//! Persistence for the activity log. Append and read only: there is no update or delete.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::activity::{ActivityLogEntry, NewActivity};

/// Backing store for activity entries.
///
/// Carried in `ActivityLog` as `Arc<dyn ActivityStore>`.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn append(&self, entry: NewActivity) -> Result<ActivityLogEntry, AppError>;

    /// All entries, newest first. Ties on timestamp fall back to insertion order.
    async fn list_newest_first(&self) -> Result<Vec<ActivityLogEntry>, AppError>;
}

pub struct PgActivityStore {
    pool: PgPool,
}

impl PgActivityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn append(&self, entry: NewActivity) -> Result<ActivityLogEntry, AppError> {
        let row = sqlx::query_as::<_, ActivityLogEntry>(
            r#"
            INSERT INTO activity_log
                (user_id, user_email, user_display_name, feature, action, details)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, seq, user_id, user_email, user_display_name,
                      feature, action, details, created_at
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.user_email)
        .bind(&entry.user_display_name)
        .bind(&entry.feature)
        .bind(&entry.action)
        .bind(&entry.details)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_newest_first(&self) -> Result<Vec<ActivityLogEntry>, AppError> {
        let rows = sqlx::query_as::<_, ActivityLogEntry>(
            r#"
            SELECT id, seq, user_id, user_email, user_display_name,
                   feature, action, details, created_at
            FROM activity_log
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::atomic::{AtomicI64, Ordering};

    use chrono::Utc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::*;

    /// Vec-backed store for unit tests.
    #[derive(Default)]
    pub struct InMemoryActivityStore {
        rows: RwLock<Vec<ActivityLogEntry>>,
        next_seq: AtomicI64,
    }

    #[async_trait]
    impl ActivityStore for InMemoryActivityStore {
        async fn append(&self, entry: NewActivity) -> Result<ActivityLogEntry, AppError> {
            let row = ActivityLogEntry {
                id: Uuid::new_v4(),
                seq: self.next_seq.fetch_add(1, Ordering::SeqCst) + 1,
                user_id: entry.user_id,
                user_email: entry.user_email,
                user_display_name: entry.user_display_name,
                feature: entry.feature,
                action: entry.action,
                details: entry.details,
                created_at: Utc::now(),
            };
            self.rows.write().await.push(row.clone());
            Ok(row)
        }

        async fn list_newest_first(&self) -> Result<Vec<ActivityLogEntry>, AppError> {
            let mut rows = self.rows.read().await.clone();
            rows.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.seq.cmp(&a.seq))
            });
            Ok(rows)
        }
    }
}
