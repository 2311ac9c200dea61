//! InfoFi post generator: technical analysis posts from source material.
//!
//! The model is asked for 3-5 variations. Fewer than 3 are padded with
//! placeholder entries so callers can always render three cards.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::fallback::{llm_failure, require_text};
use crate::generation::prompts::{INFOFI_PROMPT_TEMPLATE, INFOFI_ROLE};
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::LlmClient;

pub const MIN_VARIATIONS: usize = 3;
const PLACEHOLDER_CONTENT: &str =
    "Could not generate additional variations. Please try refining your source material.";

#[derive(Debug, Clone, Deserialize)]
pub struct InfoFiRequest {
    pub source_material: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub source_material: String,
    pub key_finding: String,
    pub market_relevance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostVariation {
    pub version: String,
    pub content: String,
    pub target: String,
    pub yap_potential: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub best_version: String,
    pub timing: String,
    pub follow_up: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoFiPost {
    pub analysis_summary: AnalysisSummary,
    #[serde(default)]
    pub optimized_posts: Vec<PostVariation>,
    pub recommendation: Recommendation,
}

pub async fn generate_infofi_post(
    llm: &LlmClient,
    request: &InfoFiRequest,
) -> Result<InfoFiPost, AppError> {
    let source = require_text("source_material", &request.source_material)?;
    let prompt = INFOFI_PROMPT_TEMPLATE.replace("{source_material}", source);

    let mut output: InfoFiPost = llm
        .call_json(&prompt, &system_prompt(INFOFI_ROLE))
        .await
        .map_err(|e| llm_failure("InfoFi generation", e))?;

    pad_variations(&mut output.optimized_posts);
    Ok(output)
}

/// Appends placeholders until there are at least [`MIN_VARIATIONS`] entries.
pub fn pad_variations(posts: &mut Vec<PostVariation>) {
    while posts.len() < MIN_VARIATIONS {
        posts.push(PostVariation {
            version: format!("Placeholder Focus {}", posts.len() + 1),
            content: PLACEHOLDER_CONTENT.to_string(),
            target: "N/A".to_string(),
            yap_potential: "Low".to_string(),
        });
    }
}
