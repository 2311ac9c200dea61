//! Password hashing with Argon2id. Hashes are stored as PHC strings.
//!
//! Hashing is CPU-bound, so both directions run on the blocking pool.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Verified against when the account does not exist, so unknown emails cost
/// the same as wrong passwords.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {e}")))?
}

/// Checks `password` against the stored hash. With no stored hash (unknown
/// account) the check still runs against a dummy hash and returns false.
pub async fn verify_password(password: &str, stored_hash: Option<&str>) -> Result<bool, AppError> {
    let password = password.to_owned();
    let stored_hash = stored_hash.map(str::to_owned);
    tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_blocking(&password, &hash),
        None => {
            verify_blocking(&password, dummy_hash());
            false
        }
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification task failed: {e}")))
}

fn hash_blocking(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// False for a wrong password or an unparsable stored hash.
fn verify_blocking(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| hash_blocking("yapforge-no-such-account").unwrap_or_default())
}
