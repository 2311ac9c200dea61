/// LLM Client: the single point of entry for all Claude API calls in Yapforge.
///
/// No other module may call the Anthropic API directly.
/// Calls are made exactly once: no retries, no backoff. Callers decide how to
/// surface a failure (see `generation::fallback`).
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// True when the upstream refused the call because of rate limiting.
    ///
    /// Checks the status code first, then the error text for a whole `429`
    /// token or a `rate_limit` error type. Parse and empty-content failures
    /// come from our side of the call and never count.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            LlmError::Api { status, message } => *status == 429 || mentions_rate_limit(message),
            LlmError::Http(e) => {
                e.status().map(|s| s.as_u16() == 429).unwrap_or(false)
                    || mentions_rate_limit(&e.to_string())
            }
            LlmError::Parse(_) | LlmError::EmptyContent => false,
        }
    }
}

fn mentions_rate_limit(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .any(|token| token == "429" || token.starts_with("rate_limit"))
}

/// An image attached to a prompt, already split out of its data URI.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub media_type: String,
    pub base64_data: String,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<RequestBlock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RequestBlock<'a> {
    Text { text: &'a str },
    Image { source: ImageSource<'a> },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'a str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first non-blank text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .find(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The single LLM client used by all generation flows.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
        })
    }

    /// Makes a single call to the Claude API, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        image: Option<&ImageInput>,
    ) -> Result<LlmResponse, LlmError> {
        let mut content = Vec::with_capacity(2);
        if let Some(image) = image {
            content.push(RequestBlock::Image {
                source: ImageSource {
                    source_type: "base64",
                    media_type: &image.media_type,
                    data: &image.base64_data,
                },
            });
        }
        content.push(RequestBlock::Text { text: prompt });

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("LLM API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }

    /// Calls the LLM and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        self.call_json_with_image(prompt, system, None).await
    }

    /// Same as [`call_json`](Self::call_json) but with an optional image block.
    pub async fn call_json_with_image<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        image: Option<&ImageInput>,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system, image).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        parse_json_text(text)
    }
}

/// Parses model output as JSON after stripping any markdown fences.
pub fn parse_json_text<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_json_text_blank_is_empty_content() {
        let err = parse_json_text::<serde_json::Value>("   ").unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[test]
    fn test_rate_limit_detected_by_status() {
        let err = LlmError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_rate_limit_detected_in_message_text() {
        let err = LlmError::Api {
            status: 500,
            message: "upstream said: 429 Too Many Requests".to_string(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_other_errors_are_not_rate_limits() {
        let err = LlmError::Api {
            status: 400,
            message: "invalid request".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert!(!LlmError::EmptyContent.is_rate_limited());
    }

    #[test]
    fn test_rate_limit_error_type_detected() {
        let err = LlmError::Api {
            status: 500,
            message: "rate_limit_error: Number of requests has exceeded your rate limit".to_string(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_429_must_be_a_whole_token() {
        let err = LlmError::Api {
            status: 400,
            message: "max_tokens: 4290 > 4096, which is the maximum allowed".to_string(),
        };
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_parse_error_at_column_429_is_not_a_rate_limit() {
        // The offending key sits at column 429.
        let text = format!("{{{}x}}", " ".repeat(427));
        let err = parse_json_text::<serde_json::Value>(&text).unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
        assert!(!err.is_rate_limited());

        let err = parse_json_text::<bool>("429").unwrap_err();
        assert!(err.to_string().contains("429"));
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_response_text_skips_blank_blocks() {
        let response: LlmResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "text", "text": "  "},
                    {"type": "text", "text": "{\"ok\": true}"}
                ],
                "usage": {"input_tokens": 10, "output_tokens": 5}
            }"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("{\"ok\": true}"));
    }

    #[test]
    fn test_request_serializes_image_block_before_text() {
        let request = AnthropicRequest {
            model: MODEL,
            max_tokens: 10,
            system: "sys",
            messages: vec![AnthropicMessage {
                role: "user",
                content: vec![
                    RequestBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type: "image/png",
                            data: "aGk=",
                        },
                    },
                    RequestBlock::Text { text: "hello" },
                ],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        let content = &value["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["media_type"], "image/png");
        assert_eq!(content[1]["type"], "text");
        assert_eq!(content[1]["text"], "hello");
    }
}
