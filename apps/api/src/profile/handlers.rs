use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::auth::accounts::{update_display_name, update_photo_url};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::profile::avatar::replace_avatar;
use crate::state::AppState;

const AVATAR_FIELD: &str = "avatar";
const MAX_DISPLAY_NAME_CHARS: usize = 64;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

/// PATCH /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let name = validate_display_name(&req.display_name)?;
    let updated = update_display_name(&state.db, user.id, name).await?;
    Ok(Json(updated.profile()))
}

/// POST /api/v1/profile/avatar
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UserProfile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("could not read avatar: {e}")))?;

        let db = &state.db;
        let updated = replace_avatar(
            &state.s3,
            &state.config.s3_bucket,
            &state.config.s3_public_url,
            user.id,
            &content_type,
            data,
            |url| async move { update_photo_url(db, user.id, &url).await },
        )
        .await?;
        return Ok(Json(updated.profile()));
    }

    Err(AppError::Validation(format!(
        "multipart field '{AVATAR_FIELD}' is required"
    )))
}

fn validate_display_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("display_name cannot be blank".to_string()));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "display_name must be at most {MAX_DISPLAY_NAME_CHARS} characters"
        )));
    }
    Ok(name)
}
