//! Axum route handlers for account creation and sessions.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::accounts::{create_account, find_by_email, normalize_email};
use crate::auth::extractor::{AuthUser, SessionToken};
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserProfile,
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let email = normalize_email(&request.email)?;
    validate_password(&request.password)?;
    let display_name = request
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let password_hash = hash_password(&request.password).await?;
    let user = create_account(&state.db, &email, &password_hash, display_name).await?;
    let token = state.sessions.create(user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            user: user.profile(),
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    // Malformed emails get the same answer as wrong credentials.
    let email = normalize_email(&request.email).map_err(|_| AppError::Unauthorized)?;

    let user = find_by_email(&state.db, &email).await?;
    let verified = verify_password(
        &request.password,
        user.as_ref().map(|u| u.password_hash.as_str()),
    )
    .await?;
    let user = user.filter(|_| verified).ok_or(AppError::Unauthorized)?;

    let token = state.sessions.create(user.id).await?;
    info!("User {} logged in", user.id);

    Ok(Json(SessionResponse {
        token,
        user: user.profile(),
    }))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<StatusCode, AppError> {
    state.sessions.revoke(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(user.profile())
}
