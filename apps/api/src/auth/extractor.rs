use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::auth::accounts::find_by_id;
use crate::auth::session::bearer_token;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// The authenticated caller, resolved from the bearer token on every request.
///
/// Handlers take this as an argument; there is no ambient "current user".
/// Use `Option<AuthUser>` where anonymous access should render a denial state.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AppError::Unauthorized)?;

        let user_id = state
            .sessions
            .resolve(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let user = find_by_id(&state.db, user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser(user))
    }
}

/// The raw bearer token of the request, for logout.
pub struct SessionToken(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .map(|t| SessionToken(t.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}
