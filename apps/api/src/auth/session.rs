//! Bearer-token sessions held in Redis with a TTL.

use redis::AsyncCommands;
use redis::Client as RedisClient;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Clone)]
pub struct SessionStore {
    client: RedisClient,
    ttl_secs: u64,
}

impl SessionStore {
    pub fn new(client: RedisClient, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    /// Issues a fresh opaque token for `user_id`.
    pub async fn create(&self, user_id: Uuid) -> Result<String, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(session_key(&token), user_id.to_string(), self.ttl_secs)
            .await?;
        Ok(token)
    }

    /// Looks up the account behind a token. Unknown or expired tokens yield `None`.
    pub async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(session_key(token)).await?;
        Ok(value.and_then(|v| Uuid::parse_str(&v).ok()))
    }

    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(session_key(token)).await?;
        Ok(())
    }
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
