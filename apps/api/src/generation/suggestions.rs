//! Draft suggestions from a trending topic and the user's best past posts.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::fallback::{llm_failure, require_text};
use crate::generation::prompts::{bullet_list, SUGGESTIONS_PROMPT_TEMPLATE, SUGGESTIONS_ROLE};
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::LlmClient;

const DEFAULT_DRAFT_SUGGESTION: &str =
    "Share your honest take on this trend and ask your followers where they stand.";

#[derive(Debug, Clone, Deserialize)]
pub struct DraftSuggestionsRequest {
    pub trending_topic: String,
    #[serde(default)]
    pub successful_past_posts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSuggestions {
    #[serde(default)]
    pub draft_suggestions: Vec<String>,
}

pub async fn generate_draft_suggestions(
    llm: &LlmClient,
    request: &DraftSuggestionsRequest,
) -> Result<DraftSuggestions, AppError> {
    let topic = require_text("trending_topic", &request.trending_topic)?;
    let past_posts = if request.successful_past_posts.is_empty() {
        "(none provided)".to_string()
    } else {
        bullet_list(&request.successful_past_posts)
    };

    let prompt = SUGGESTIONS_PROMPT_TEMPLATE
        .replace("{trending_topic}", topic)
        .replace("{past_posts}", &past_posts);

    let output: DraftSuggestions = llm
        .call_json(&prompt, &system_prompt(SUGGESTIONS_ROLE))
        .await
        .map_err(|e| llm_failure("Draft suggestions", e))?;

    Ok(with_default(output))
}

fn with_default(mut output: DraftSuggestions) -> DraftSuggestions {
    output.draft_suggestions.retain(|s| !s.trim().is_empty());
    if output.draft_suggestions.is_empty() {
        output.draft_suggestions.push(DEFAULT_DRAFT_SUGGESTION.to_string());
    }
    output
}
