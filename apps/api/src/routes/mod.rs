pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::activity::handlers as activity;
use crate::auth::handlers as auth;
use crate::generation::handlers as tools;
use crate::profile::avatar::MAX_AVATAR_BYTES;
use crate::profile::handlers as profile;
use crate::state::AppState;

/// Headroom for multipart boundaries and headers around the avatar bytes.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Profile
        .route("/api/v1/profile", patch(profile::handle_update_profile))
        .route(
            "/api/v1/profile/avatar",
            post(profile::handle_upload_avatar)
                .layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        // Tools
        .route("/api/v1/tools/yap-score", post(tools::handle_yap_score))
        .route("/api/v1/tools/improve-draft", post(tools::handle_improve_draft))
        .route("/api/v1/tools/infofi-post", post(tools::handle_infofi_post))
        .route("/api/v1/tools/thread", post(tools::handle_thread))
        .route("/api/v1/tools/content-ideas", post(tools::handle_content_ideas))
        .route("/api/v1/tools/reply", post(tools::handle_reply))
        .route("/api/v1/tools/post-mortem", post(tools::handle_post_mortem))
        .route("/api/v1/tools/persona", post(tools::handle_persona))
        .route(
            "/api/v1/tools/draft-suggestions",
            post(tools::handle_draft_suggestions),
        )
        // Admin
        .route("/api/v1/admin/activity", get(activity::handle_list_activity))
        .route(
            "/api/v1/admin/activity/stream",
            get(activity::handle_activity_stream),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aws_sdk_s3::config::{BehaviorVersion, Region};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::activity::policy::AllowListPolicy;
    use crate::activity::store::memory::InMemoryActivityStore;
    use crate::activity::ActivityLog;
    use crate::auth::SessionStore;
    use crate::config::Config;
    use crate::llm_client::LlmClient;

    /// State whose backing services are never contacted by the routes under test.
    fn offline_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/yapforge".to_string(),
            redis_url: "redis://127.0.0.1/".to_string(),
            s3_bucket: "yapforge".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            s3_public_url: "http://localhost:9000".to_string(),
            aws_access_key_id: "minio".to_string(),
            aws_secret_access_key: "minio123".to_string(),
            anthropic_api_key: "test-key".to_string(),
            admin_emails: vec!["admin@example.com".to_string()],
            session_ttl_secs: 60,
            port: 0,
            rust_log: "debug".to_string(),
        };

        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let redis = redis::Client::open(config.redis_url.clone()).unwrap();
        let s3 = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new("us-east-1"))
                .build(),
        );

        AppState {
            db,
            sessions: SessionStore::new(redis, config.session_ttl_secs),
            s3,
            llm: LlmClient::new(config.anthropic_api_key.clone()).unwrap(),
            activity: ActivityLog::new(Arc::new(InMemoryActivityStore::default())),
            access_policy: Arc::new(AllowListPolicy::new(&config.admin_emails)),
            config,
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_tools_require_a_session() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(
                Request::post("/api/v1/tools/yap-score")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"draft":"gm"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_anonymous_admin_view_renders_denied() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(
                Request::get("/api/v1/admin/activity")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["access"], "denied");
    }

    #[tokio::test]
    async fn test_logout_without_token_is_unauthorized() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(
                Request::post("/api/v1/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
