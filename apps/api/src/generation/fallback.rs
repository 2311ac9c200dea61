//! Failure policy shared by the generation flows.
//!
//! Every flow fails hard on an unusable model response. Rate limiting is the
//! one upstream condition handled differently: most flows surface it as
//! `AppError::RateLimited`, while degrading flows swap in a placeholder result.

use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmError;

/// Suggestion text used by degraded results.
pub const RATE_LIMIT_SUGGESTION: &str =
    "The AI service is temporarily rate limited. Please wait a minute and analyze again.";

/// Maps a client error to the application taxonomy.
pub fn llm_failure(flow: &str, err: LlmError) -> AppError {
    if err.is_rate_limited() {
        warn!("{flow}: upstream rate limited");
        AppError::RateLimited
    } else {
        AppError::Llm(format!("{flow} failed: {err}"))
    }
}

/// Like [`llm_failure`], but a rate-limited call yields `placeholder()` instead of an error.
pub fn degrade_on_rate_limit<T>(
    flow: &str,
    result: Result<T, LlmError>,
    placeholder: impl FnOnce() -> T,
) -> Result<T, AppError> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_rate_limited() => {
            warn!("{flow}: upstream rate limited, returning placeholder result");
            Ok(placeholder())
        }
        Err(err) => Err(llm_failure(flow, err)),
    }
}

/// Rejects empty or whitespace-only required input before any network call.
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_limited() -> LlmError {
        LlmError::Api {
            status: 429,
            message: "rate_limit_error".to_string(),
        }
    }

    #[test]
    fn test_rate_limit_maps_to_rate_limited_error() {
        assert!(matches!(
            llm_failure("thread", rate_limited()),
            AppError::RateLimited
        ));
    }

    #[test]
    fn test_other_failures_map_to_llm_error() {
        assert!(matches!(
            llm_failure("thread", LlmError::EmptyContent),
            AppError::Llm(_)
        ));
    }

    #[test]
    fn test_degrade_returns_placeholder_on_rate_limit() {
        let result: Result<u32, LlmError> = Err(rate_limited());
        let value = degrade_on_rate_limit("yap", result, || 0).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn test_degrade_passes_through_success() {
        let value = degrade_on_rate_limit("yap", Ok(7), || 0).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_degrade_still_fails_on_other_errors() {
        let result: Result<u32, LlmError> = Err(LlmError::EmptyContent);
        assert!(degrade_on_rate_limit("yap", result, || 0).is_err());
    }

    #[test]
    fn test_unparsable_output_is_an_llm_error_not_a_placeholder() {
        let text = format!("{{{}x}}", " ".repeat(427));
        let result: Result<u32, LlmError> = crate::llm_client::parse_json_text(&text);
        assert!(matches!(
            degrade_on_rate_limit("yap", result, || 0),
            Err(AppError::Llm(_))
        ));
    }

    #[test]
    fn test_require_text_rejects_whitespace() {
        assert!(matches!(
            require_text("draft", "   \n"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(require_text("draft", "  gm  ").unwrap(), "gm");
    }
}
