//! Draft improver: rewrites a draft, optionally in a persona's voice.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::fallback::{llm_failure, require_text};
use crate::generation::prompts::{DEFAULT_PERSONA_BLOCK, IMPROVE_PROMPT_TEMPLATE, IMPROVE_ROLE};
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::LlmClient;

/// How the rewrite should sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persona {
    Default,
    Wale,
    Bandit,
    /// A free-text bio, usually produced by the persona generator.
    Custom(String),
}

impl Persona {
    /// Resolves the request's persona string. Preset names match case-insensitively.
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Persona::Default;
        };
        match raw.to_lowercase().as_str() {
            "the wale" | "wale" => Persona::Wale,
            "the bandit" | "bandit" => Persona::Bandit,
            _ => Persona::Custom(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Persona::Default => "Default",
            Persona::Wale => "The Wale",
            Persona::Bandit => "The Bandit",
            Persona::Custom(_) => "Custom",
        }
    }

    fn prompt_block(&self) -> String {
        match self {
            Persona::Default => DEFAULT_PERSONA_BLOCK.to_string(),
            Persona::Wale => "You MUST adopt the persona \"The Wale\".
- Style: concentrated, thoughtful, data-driven.
- Posts less often but with more depth: data insights and historical context OG crypto members care about.
- Avoids obscure projects; sticks to material the audience already wants to discuss.
- Voice of a respected community member sharing carefully considered insight."
                .to_string(),
            Persona::Bandit => "You MUST adopt the persona \"The Bandit\".
- Style: comedic, witty, high-frequency.
- Alternates informative project posts with timely comedy and running inside jokes.
- Critiques the timeline in a light-hearted way and avoids heavy jargon.
- Voice is dynamic, funny, relatable, and always fishing for replies."
                .to_string(),
            Persona::Custom(bio) => format!(
                "You MUST adopt the voice described by this custom persona bio:\n{bio}\n\
                 Match its topics, tone, audience, and content style."
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImproveDraftRequest {
    pub draft: String,
    pub persona: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImprovedDraft {
    pub improved_draft: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImproveDraftResponse {
    pub improved_draft: String,
    pub persona: String,
}

pub async fn improve_draft(
    llm: &LlmClient,
    request: &ImproveDraftRequest,
) -> Result<ImproveDraftResponse, AppError> {
    let draft = require_text("draft", &request.draft)?;
    let persona = Persona::resolve(request.persona.as_deref());

    let prompt = IMPROVE_PROMPT_TEMPLATE
        .replace("{persona_block}", &persona.prompt_block())
        .replace("{draft}", draft);

    let output: ImprovedDraft = llm
        .call_json(&prompt, &system_prompt(IMPROVE_ROLE))
        .await
        .map_err(|e| llm_failure("Draft improvement", e))?;

    let improved_draft = output.improved_draft.trim().to_string();
    if improved_draft.is_empty() {
        return Err(AppError::Llm("Draft improvement returned an empty draft".to_string()));
    }

    Ok(ImproveDraftResponse {
        improved_draft,
        persona: persona.label().to_string(),
    })
}
