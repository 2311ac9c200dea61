//! Account persistence over the `users` table.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;

const USER_COLUMNS: &str =
    "id, email, password_hash, display_name, photo_url, created_at, updated_at";

/// Trims and lower-cases an email, rejecting obviously malformed input.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("a valid email address is required".to_string()));
    }
    Ok(email)
}

pub async fn create_account(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    display_name: Option<&str>,
) -> Result<User, AppError> {
    let result = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, password_hash, display_name) VALUES ($1, $2, $3) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(email)
    .bind(password_hash)
    .bind(display_name)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => {
            info!("Created account {} ({})", user.id, user.email);
            Ok(user)
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
            AppError::Conflict("an account with this email already exists".to_string()),
        ),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn update_display_name(
    pool: &PgPool,
    id: Uuid,
    display_name: &str,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET display_name = $1, updated_at = now() WHERE id = $2 \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(display_name)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
}

pub async fn update_photo_url(pool: &PgPool, id: Uuid, photo_url: &str) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET photo_url = $1, updated_at = now() WHERE id = $2 \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(photo_url)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email("  Ike@Example.COM ").unwrap(), "ike@example.com");
    }

    #[test]
    fn test_normalize_email_rejects_malformed() {
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("a@localhost").is_err());
        assert!(normalize_email("a@b@c.com").is_err());
    }
}
