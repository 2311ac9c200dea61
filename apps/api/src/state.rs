use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::activity::policy::AccessPolicy;
use crate::activity::ActivityLog;
use crate::auth::SessionStore;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Bearer sessions, backed by Redis.
    pub sessions: SessionStore,
    /// Avatar storage.
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Append-only activity log plus its live broadcast.
    pub activity: ActivityLog,
    /// Who may read the activity log. Default: allow-list from ADMIN_EMAILS.
    pub access_policy: Arc<dyn AccessPolicy>,
}
