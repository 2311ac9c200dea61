//! Yap Optimizer: predicts the Yap and Tweepcred scores of a draft.
//!
//! Flow: validate → prompt → LLM (raw scores) → score adjuster → defaults.
//! A rate-limited upstream yields a zero-score placeholder report rather than an error.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::fallback::{degrade_on_rate_limit, require_text, RATE_LIMIT_SUGGESTION};
use crate::generation::prompts::{
    AUTHORITY_HIGH, AUTHORITY_STANDARD, YAP_SCORE_PROMPT_TEMPLATE, YAP_SCORE_ROLE,
};
use crate::generation::score_adjuster::{
    adjust_score, matched_keywords, normalize_score, Sentiment, DEFAULT_BOOST_KEYWORDS,
};
use crate::llm_client::prompts::analyst_system_prompt;
use crate::llm_client::LlmClient;

pub const DEFAULT_SUGGESTION: &str =
    "Looks solid. Try a sharper opening line or end with a question to invite replies.";
pub const DEFAULT_TWEEPCRED_SUGGESTION: &str =
    "No reputation risks found. Keep engaging genuinely and avoid links in the main post.";

#[derive(Debug, Clone, Deserialize)]
pub struct YapScoreRequest {
    pub draft: String,
    pub author_follower_count: Option<u64>,
}

/// Scores exactly as the model returned them. Nothing here is trusted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawYapScore {
    pub yap_score: f64,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub tweepcred_score: f64,
    #[serde(default)]
    pub tweepcred_suggestions: Vec<String>,
}

/// The report returned to callers. Both scores are within [0, 10].
#[derive(Debug, Clone, Serialize)]
pub struct YapScoreReport {
    pub yap_score: f64,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub tweepcred_score: f64,
    pub tweepcred_suggestions: Vec<String>,
    /// Boost keywords that contributed to `yap_score`.
    pub boosted_keywords: Vec<String>,
    /// True when this is a placeholder produced under rate limiting.
    pub degraded: bool,
}

impl YapScoreReport {
    pub fn rate_limited() -> Self {
        Self {
            yap_score: 0.0,
            sentiment: Sentiment::Neutral,
            keywords: vec![],
            suggestions: vec![RATE_LIMIT_SUGGESTION.to_string()],
            tweepcred_score: 0.0,
            tweepcred_suggestions: vec![],
            boosted_keywords: vec![],
            degraded: true,
        }
    }
}

pub async fn score_draft(
    llm: &LlmClient,
    request: &YapScoreRequest,
) -> Result<YapScoreReport, AppError> {
    let draft = require_text("draft", &request.draft)?;

    let prompt = build_prompt(draft, request.author_follower_count);
    let result = llm
        .call_json::<RawYapScore>(&prompt, &analyst_system_prompt(YAP_SCORE_ROLE))
        .await
        .map(|raw| finalize(raw, draft));

    let report = degrade_on_rate_limit("Yap score", result, YapScoreReport::rate_limited)?;
    info!(
        "Yap score {} (tweepcred {}, degraded={})",
        report.yap_score, report.tweepcred_score, report.degraded
    );
    Ok(report)
}

fn build_prompt(draft: &str, follower_count: Option<u64>) -> String {
    let authority = match follower_count {
        Some(n) if n > 0 => AUTHORITY_HIGH.replace("{followers}", &n.to_string()),
        _ => AUTHORITY_STANDARD.to_string(),
    };
    YAP_SCORE_PROMPT_TEMPLATE
        .replace("{authority_context}", &authority)
        .replace("{draft}", draft)
}

/// Applies the business rules to a raw model result.
pub fn finalize(raw: RawYapScore, draft: &str) -> YapScoreReport {
    let sentiment = Sentiment::parse(&raw.sentiment);
    let yap_score = adjust_score(raw.yap_score, sentiment, draft, &DEFAULT_BOOST_KEYWORDS);
    let boosted_keywords = matched_keywords(draft, &DEFAULT_BOOST_KEYWORDS)
        .into_iter()
        .map(str::to_string)
        .collect();

    YapScoreReport {
        yap_score,
        sentiment,
        keywords: raw.keywords,
        suggestions: non_empty_or(raw.suggestions, DEFAULT_SUGGESTION),
        tweepcred_score: normalize_score(raw.tweepcred_score),
        tweepcred_suggestions: non_empty_or(raw.tweepcred_suggestions, DEFAULT_TWEEPCRED_SUGGESTION),
        boosted_keywords,
        degraded: false,
    }
}

fn non_empty_or(items: Vec<String>, default: &str) -> Vec<String> {
    let items: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        vec![default.to_string()]
    } else {
        items
    }
}
