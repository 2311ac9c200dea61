//! Thread generator: splits source material into a numbered X thread.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::fallback::{llm_failure, require_text};
use crate::generation::prompts::{THREAD_PROMPT_TEMPLATE, THREAD_ROLE};
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::LlmClient;

pub const MIN_POSTS: u32 = 2;
pub const MAX_POSTS: u32 = 25;

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadRequest {
    pub source_material: String,
    pub num_posts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    #[serde(default)]
    pub thread: Vec<String>,
}

pub async fn generate_thread(llm: &LlmClient, request: &ThreadRequest) -> Result<Thread, AppError> {
    let source = require_text("source_material", &request.source_material)?;
    validate_num_posts(request.num_posts)?;

    let prompt = THREAD_PROMPT_TEMPLATE
        .replace("{num_posts}", &request.num_posts.to_string())
        .replace("{source_material}", source);

    let output: Thread = llm
        .call_json(&prompt, &system_prompt(THREAD_ROLE))
        .await
        .map_err(|e| llm_failure("Thread generation", e))?;

    let thread = clean_posts(output.thread);
    if thread.is_empty() {
        return Err(AppError::Llm("Thread generation returned no posts".to_string()));
    }
    Ok(Thread { thread })
}

pub fn validate_num_posts(num_posts: u32) -> Result<(), AppError> {
    if !(MIN_POSTS..=MAX_POSTS).contains(&num_posts) {
        return Err(AppError::Validation(format!(
            "num_posts must be between {MIN_POSTS} and {MAX_POSTS}"
        )));
    }
    Ok(())
}

fn clean_posts(posts: Vec<String>) -> Vec<String> {
    posts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
