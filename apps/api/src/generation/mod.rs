// Tool flows: each builds a prompt, makes one LLM call, and shapes the typed result.
// All LLM calls go through llm_client; no direct Anthropic calls here.
// The only deterministic scoring lives in score_adjuster.

pub mod fallback;
pub mod handlers;
pub mod ideas;
pub mod improve;
pub mod infofi;
pub mod persona;
pub mod post_mortem;
pub mod prompts;
pub mod reply;
pub mod score_adjuster;
pub mod suggestions;
pub mod thread;
pub mod yap_score;
