// Shared prompt fragments. Each tool keeps its own templates in
// `generation::prompts`; this file holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Context about the 2025 X ranking signals, shared by analysis prompts.
pub const X_ALGORITHM_CONTEXT: &str = "\
    The modern X algorithm rewards replies and genuine conversation over likes, \
    favours authentic voices and unique insight, and penalises links, ALL CAPS, \
    offensive language, spam and low text quality.";

/// Builds a system prompt from a role description plus the JSON-only rules.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}

/// Like [`system_prompt`], with the ranking-signal context prepended to the rules.
pub fn analyst_system_prompt(role: &str) -> String {
    format!("{role} {X_ALGORITHM_CONTEXT} {JSON_ONLY_SYSTEM}")
}
