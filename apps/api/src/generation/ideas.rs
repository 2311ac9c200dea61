//! Content ideas: five distinct post angles for a topic.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::fallback::{llm_failure, require_text};
use crate::generation::prompts::{IDEAS_PROMPT_TEMPLATE, IDEAS_ROLE};
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Deserialize)]
pub struct ContentIdeasRequest {
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentIdea {
    pub title: String,
    pub idea: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentIdeas {
    #[serde(default)]
    pub ideas: Vec<ContentIdea>,
}

pub async fn generate_content_ideas(
    llm: &LlmClient,
    request: &ContentIdeasRequest,
) -> Result<ContentIdeas, AppError> {
    let topic = require_text("topic", &request.topic)?;
    let prompt = IDEAS_PROMPT_TEMPLATE.replace("{topic}", topic);

    llm.call_json(&prompt, &system_prompt(IDEAS_ROLE))
        .await
        .map_err(|e| llm_failure("Content ideas", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_ideas_field_deserializes_empty() {
        let ideas: ContentIdeas = serde_json::from_str("{}").unwrap();
        assert!(ideas.ideas.is_empty());
    }

    #[test]
    fn test_ideas_parse_from_fenced_output() {
        let text = "```json\n{\"ideas\": [{\"title\": \"Hot take\", \"idea\": \"L2 fees are a UX problem\"}]}\n```";
        let ideas: ContentIdeas = crate::llm_client::parse_json_text(text).unwrap();
        assert_eq!(ideas.ideas.len(), 1);
        assert_eq!(ideas.ideas[0].title, "Hot take");
    }

    #[tokio::test]
    async fn test_blank_topic_rejected_before_any_call() {
        let llm = LlmClient::new("test-key".to_string()).unwrap();
        let request = ContentIdeasRequest {
            topic: "   ".to_string(),
        };
        assert!(matches!(
            generate_content_ideas(&llm, &request).await,
            Err(AppError::Validation(_))
        ));
    }
}
