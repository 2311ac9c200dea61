//! Post-mortem analyzer: what worked, what didn't, and how much potential was missed.
//!
//! Degrades like the Yap optimizer: a rate-limited upstream returns a zero-score
//! report with a single explanatory entry in `could_be_improved`.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::fallback::{degrade_on_rate_limit, require_text, RATE_LIMIT_SUGGESTION};
use crate::generation::prompts::{POST_MORTEM_PROMPT_TEMPLATE, POST_MORTEM_ROLE};
use crate::generation::score_adjuster::normalize_score;
use crate::llm_client::prompts::analyst_system_prompt;
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Deserialize)]
pub struct PostMortemRequest {
    pub post_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMortem {
    #[serde(default)]
    pub what_worked: Vec<String>,
    #[serde(default)]
    pub could_be_improved: Vec<String>,
    pub missed_opportunity_score: f64,
    #[serde(default)]
    pub degraded: bool,
}

impl PostMortem {
    pub fn rate_limited() -> Self {
        Self {
            what_worked: vec![],
            could_be_improved: vec![RATE_LIMIT_SUGGESTION.to_string()],
            missed_opportunity_score: 0.0,
            degraded: true,
        }
    }

    fn normalized(mut self) -> Self {
        self.missed_opportunity_score = normalize_score(self.missed_opportunity_score);
        self.degraded = false;
        self
    }
}

pub async fn analyze_post(
    llm: &LlmClient,
    request: &PostMortemRequest,
) -> Result<PostMortem, AppError> {
    let post = require_text("post_text", &request.post_text)?;
    let prompt = POST_MORTEM_PROMPT_TEMPLATE.replace("{post_text}", post);

    let result = llm
        .call_json::<PostMortem>(&prompt, &analyst_system_prompt(POST_MORTEM_ROLE))
        .await
        .map(PostMortem::normalized);

    degrade_on_rate_limit("Post-mortem", result, PostMortem::rate_limited)
}
