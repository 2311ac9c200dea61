//! Admin views over the activity log.
//!
//! Viewers who are not signed in or not allowed get `{"access": "denied"}` with a
//! 200 status; the dashboard renders that state in place.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use serde::Serialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::activity::ActivityLogEntry;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum AdminActivityView {
    Denied,
    Granted { entries: Vec<ActivityLogEntry> },
}

fn is_authorized(state: &AppState, viewer: &Option<AuthUser>) -> bool {
    viewer
        .as_ref()
        .map(|AuthUser(user)| state.access_policy.can_view_activity(user))
        .unwrap_or(false)
}

/// GET /api/v1/admin/activity
pub async fn handle_list_activity(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
) -> Result<Json<AdminActivityView>, AppError> {
    if !is_authorized(&state, &viewer) {
        return Ok(Json(AdminActivityView::Denied));
    }
    let entries = state.activity.list().await?;
    Ok(Json(AdminActivityView::Granted { entries }))
}

/// GET /api/v1/admin/activity/stream
///
/// Server-sent events, one `activity` event per newly recorded entry.
pub async fn handle_activity_stream(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
) -> Response {
    if !is_authorized(&state, &viewer) {
        return Json(AdminActivityView::Denied).into_response();
    }

    let stream = BroadcastStream::new(state.activity.subscribe()).filter_map(|result| {
        // Lagged receivers skip what they missed; the client can re-list.
        let entry = result.ok()?;
        Event::default()
            .event("activity")
            .json_data(&entry)
            .ok()
            .map(Ok::<Event, Infallible>)
    });

    Sse::new(stream).keep_alive(KeepAlive::default()).into_response()
}
