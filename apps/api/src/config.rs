use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base URL used to build public avatar links. Falls back to `s3_endpoint`.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub admin_emails: Vec<String>,
    pub session_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_endpoint = require_env("S3_ENDPOINT")?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_public_url: std::env::var("S3_PUBLIC_URL").unwrap_or_else(|_| s3_endpoint.clone()),
            s3_endpoint,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            admin_emails: parse_email_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default()),
            session_ttl_secs: parse_session_ttl(
                &std::env::var("SESSION_TTL_SECS").unwrap_or_else(|_| "604800".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Session TTL in seconds. Zero is refused: Redis rejects `SET EX 0`.
fn parse_session_ttl(raw: &str) -> Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("SESSION_TTL_SECS must be a positive integer")?;
    anyhow::ensure!(secs > 0, "SESSION_TTL_SECS must be a positive integer");
    Ok(secs)
}

/// Splits a comma-separated list, normalising each address to lower case.
fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_list_trims_and_lowercases() {
        let emails = parse_email_list(" Admin@Example.com, ops@example.com ,,");
        assert_eq!(emails, vec!["admin@example.com", "ops@example.com"]);
    }

    #[test]
    fn test_session_ttl_must_be_positive() {
        assert_eq!(parse_session_ttl("604800").unwrap(), 604800);
        assert!(parse_session_ttl("0").is_err());
        assert!(parse_session_ttl("-5").is_err());
        assert!(parse_session_ttl("week").is_err());
    }

    #[test]
    fn test_parse_email_list_empty() {
        assert!(parse_email_list("").is_empty());
    }
}
