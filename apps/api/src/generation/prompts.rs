// All LLM prompt constants for the generation tools.
// Placeholders use `{name}` and are filled with `str::replace` before sending.

/// Yap score analysis. Replace: {authority_context}, {draft}
pub const YAP_SCORE_ROLE: &str = "You are an expert X (Twitter) strategist who predicts how a \
    post draft will perform and how it affects the author's TweetCred reputation.";

pub const YAP_SCORE_PROMPT_TEMPLATE: &str = r#"Analyze the post draft below and predict its performance.

AUTHOR CONTEXT:
{authority_context}

YAP SCORE (0-10), weighted criteria:
- Intellectual alpha & insight (40%): unique, non-obvious, data-backed perspective
- Hook strength & framing (25%): does the first line force the reader to continue?
- Discussion potential (25%): can the post anchor a high-level debate?
- Format & readability (10%): scannable, 150-250 characters

TWEEPCRED (0-10): impact on the author's reputation.
Reward credibility, genuine engagement, and support for other creators.
Penalise offensive text, ALL CAPS, links, spammy content, and poor spelling or grammar.

Return a JSON object with this EXACT schema:
{
  "yap_score": 6.5,
  "sentiment": "positive",
  "keywords": ["zkSync", "airdrop"],
  "suggestions": ["Open with a bolder claim"],
  "tweepcred_score": 7.0,
  "tweepcred_suggestions": ["Drop the external link"]
}

`sentiment` must be one of "positive", "negative", "neutral".

DRAFT:
{draft}"#;

pub const AUTHORITY_HIGH: &str = "Author authority is HIGH ({followers} followers). Evaluate the \
    draft as thought-leader content; the small-account advantage does not apply.";

pub const AUTHORITY_STANDARD: &str = "Author authority is STANDARD (small or emerging account). \
    Prioritise authenticity, niche expertise, and engagement-driving questions.";

/// Draft rewrite. Replace: {persona_block}, {draft}
pub const IMPROVE_ROLE: &str = "You are an expert social media manager who rewrites X drafts to \
    be more engaging. The modern X algorithm prioritises replies and quality over hashtags.";

pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"{persona_block}

Return a JSON object:
{
  "improved_draft": "the rewritten post"
}

ORIGINAL DRAFT:
{draft}"#;

pub const DEFAULT_PERSONA_BLOCK: &str = "Default persona: general engagement expert.
- Make the hook stronger.
- Clarify the main point.
- If appropriate, add an open-ended question to encourage replies.
- Keep the original voice where possible, but make it more impactful.
- Do not use hashtags unless they are core to the topic.";

/// InfoFi analysis posts. Replace: {source_material}
pub const INFOFI_ROLE: &str = "You are a leading crypto/AI analyst writing authoritative, \
    data-backed InfoFi posts that earn Yap points. Output clean plain text in every field: \
    no markdown, underscores, or asterisks.";

pub const INFOFI_PROMPT_TEMPLATE: &str = r#"Analyze the source material and write 3 to 5 post variations (150-250 characters each):
1. The alpha deep-dive: the most unique technical finding, with metrics
2. The market-moving prediction: connect the finding to market impact
3. The "they're wrong" analysis: correct a common assumption
4. The bold prediction: a 3-6 month call
5. The challenging question: invite debate with an expert framing

Each post: authoritative observation, data-backed insight, forward-looking alpha, engagement hook.
No ALL CAPS, under 280 characters, tag relevant projects (e.g. @KaitoAI) where it fits.

Return a JSON object with this EXACT schema:
{
  "analysis_summary": {
    "source_material": "what was analyzed",
    "key_finding": "the main technical insight",
    "market_relevance": "why it matters now"
  },
  "optimized_posts": [
    {
      "version": "Technical Focus",
      "content": "the post",
      "target": "target audience",
      "yap_potential": "High"
    }
  ],
  "recommendation": {
    "best_version": "which version and why",
    "timing": "when to post",
    "follow_up": "thread expansion or related content"
  }
}

`yap_potential` must be "High", "Medium" or "Low".

SOURCE MATERIAL:
{source_material}"#;

/// Thread writer. Replace: {num_posts}, {source_material}
pub const THREAD_ROLE: &str = "You are an expert X thread writer.";

pub const THREAD_PROMPT_TEMPLATE: &str = r#"Turn the source material into a thread of exactly {num_posts} posts.
- Post 1 is a strong hook.
- Each following post builds on the last, one idea per post, simple sentences, line breaks for readability.
- The final post summarises, gives a takeaway, or asks a question.
- End every post with its position as (X/{num_posts}).
- Keep every post well under 280 characters.

Return a JSON object:
{
  "thread": ["first post (1/{num_posts})", "second post (2/{num_posts})"]
}

SOURCE MATERIAL:
{source_material}"#;

/// Content ideas. Replace: {topic}
pub const IDEAS_ROLE: &str = "You are an expert social media strategist in the crypto and AI space.";

pub const IDEAS_PROMPT_TEMPLATE: &str = r#"Brainstorm 5 distinct post angles for the topic below:
1. The Contrarian Take
2. The Data-Driven Hook
3. The "How-To" Angle
4. The Forward-Looking Question
5. The Simple Analogy

Return a JSON object:
{
  "ideas": [
    {"title": "The Contrarian Take", "idea": "the post idea or hook"}
  ]
}

TOPIC:
{topic}"#;

/// Authentic reply. Replace: {photo_note}, {original_post}
pub const REPLY_ROLE: &str = "You write replies to X posts that sound like a real person reacting \
    and that the algorithm boosts: specific, conversational, curious, never generic or hostile.";

pub const REPLY_PROMPT_TEMPLATE: &str = r#"Write one reply to the post below.
- Reference specific details from the post{photo_note}.
- Add context, a relatable angle, or a respectful contrarian take.
- End with a conversation starter when it fits.
- Avoid "This!", "So true!", "Great post!", promotion, and attacks.
React like you would out loud to a friend. No strategy voice.

Then rate your reply from 1 to 10 on each dimension.

Return a JSON object:
{
  "reply": "copy-paste ready reply",
  "evaluation": {
    "human_authenticity": 8,
    "engagement_potential": 7,
    "algorithm_appeal": 7,
    "controversy_level": 3,
    "rudeness_level": 1,
    "overall_quality": 8
  }
}

ORIGINAL POST:
{original_post}"#;

pub const REPLY_PHOTO_NOTE: &str = ", including the attached image";

/// Post-mortem analysis. Replace: {post_text}
pub const POST_MORTEM_ROLE: &str = "You are an expert X growth strategist writing a post-mortem of a \
    published post.";

pub const POST_MORTEM_PROMPT_TEMPLATE: &str = r#"Assess the post on hook strength, engagement triggers, value proposition, authenticity and voice, and readability.

MISSED OPPORTUNITY SCORE (0-10):
- 0-2: near-perfect, potential maximised
- 3-5: good, minor tweaks would help
- 6-8: decent, missed significant opportunities
- 9-10: good raw material, poor execution

Return a JSON object:
{
  "what_worked": ["strong hook"],
  "could_be_improved": ["no call to action"],
  "missed_opportunity_score": 5
}

POST:
{post_text}"#;

/// Persona synthesis. Replace: {posts}
pub const PERSONA_ROLE: &str = "You are an expert brand strategist and social media analyst.";

pub const PERSONA_PROMPT_TEMPLATE: &str = r#"Analyze the user's past posts along four dimensions: core topics, tone and voice, audience, and content style.
Write ONE concise paragraph, in the style of a bio, that another AI could use as a custom instruction to write in this user's voice.

Return a JSON object:
{
  "persona": "the persona paragraph"
}

PAST POSTS:
{posts}"#;

/// Draft suggestions. Replace: {trending_topic}, {past_posts}
pub const SUGGESTIONS_ROLE: &str = "You are an expert social media manager creating engaging X \
    content for the Kaito AI community.";

pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Use the trending topic and the user's successful past posts to write several new draft posts in a similar voice. Include relevant hashtags.

Return a JSON object:
{
  "draft_suggestions": ["draft one", "draft two"]
}

TRENDING TOPIC:
{trending_topic}

SUCCESSFUL PAST POSTS:
{past_posts}"#;

/// Renders a list of posts as a bulleted block for prompt inclusion.
pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|p| format!("- {}", p.as_ref().trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
