//! Persona generator: condenses a user's past posts into a reusable voice bio.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::fallback::llm_failure;
use crate::generation::prompts::{bullet_list, PERSONA_PROMPT_TEMPLATE, PERSONA_ROLE};
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaRequest {
    pub posts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPersona {
    pub persona: String,
}

pub async fn generate_persona(
    llm: &LlmClient,
    request: &PersonaRequest,
) -> Result<GeneratedPersona, AppError> {
    let posts = non_empty_posts(&request.posts)?;
    let prompt = PERSONA_PROMPT_TEMPLATE.replace("{posts}", &bullet_list(&posts));

    let output: GeneratedPersona = llm
        .call_json(&prompt, &system_prompt(PERSONA_ROLE))
        .await
        .map_err(|e| llm_failure("Persona generation", e))?;

    let persona = output.persona.trim().to_string();
    if persona.is_empty() {
        return Err(AppError::Llm("Persona generation returned an empty persona".to_string()));
    }
    Ok(GeneratedPersona { persona })
}

/// Keeps non-blank posts; at least one is required.
pub fn non_empty_posts(posts: &[String]) -> Result<Vec<&str>, AppError> {
    let posts: Vec<&str> = posts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if posts.is_empty() {
        return Err(AppError::Validation("posts must contain at least one post".to_string()));
    }
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_posts_rejected() {
        let posts = vec![" ".to_string(), String::new()];
        assert!(matches!(non_empty_posts(&posts), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_keeps_only_real_posts() {
        let posts = vec!["gm".to_string(), "  ".to_string(), " zk szn ".to_string()];
        assert_eq!(non_empty_posts(&posts).unwrap(), vec!["gm", "zk szn"]);
    }
}
