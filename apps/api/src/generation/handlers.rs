//! Axum route handlers for the tool API.
//!
//! Every tool requires an authenticated caller. A successful call is recorded
//! in the activity log on behalf of that caller; degraded placeholder results
//! are returned to the caller but not recorded.

use axum::{extract::State, Json};

use crate::activity::{snippet, Feature};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::generation::ideas::{generate_content_ideas, ContentIdeas, ContentIdeasRequest};
use crate::generation::improve::{improve_draft, ImproveDraftRequest, ImproveDraftResponse};
use crate::generation::infofi::{generate_infofi_post, InfoFiPost, InfoFiRequest};
use crate::generation::persona::{generate_persona, GeneratedPersona, PersonaRequest};
use crate::generation::post_mortem::{analyze_post, PostMortem, PostMortemRequest};
use crate::generation::reply::{generate_reply, Reply, ReplyRequest};
use crate::generation::suggestions::{
    generate_draft_suggestions, DraftSuggestions, DraftSuggestionsRequest,
};
use crate::generation::thread::{generate_thread, Thread, ThreadRequest};
use crate::generation::yap_score::{score_draft, YapScoreReport, YapScoreRequest};
use crate::state::AppState;

const DETAIL_CHARS: usize = 40;

/// POST /api/v1/tools/yap-score
pub async fn handle_yap_score(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<YapScoreRequest>,
) -> Result<Json<YapScoreReport>, AppError> {
    let report = score_draft(&state.llm, &request).await?;

    if !report.degraded {
        state
            .activity
            .record_quietly(
                &user,
                Feature::YapOptimizer,
                "Analyzed Draft",
                format!(
                    "Scored {} on: \"{}\"",
                    report.yap_score,
                    snippet(&request.draft, DETAIL_CHARS)
                ),
            )
            .await;
    }

    Ok(Json(report))
}

/// POST /api/v1/tools/improve-draft
pub async fn handle_improve_draft(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ImproveDraftRequest>,
) -> Result<Json<ImproveDraftResponse>, AppError> {
    let improved = improve_draft(&state.llm, &request).await?;

    state
        .activity
        .record_quietly(
            &user,
            Feature::DraftImprover,
            "Improved Draft",
            format!(
                "Rewrote ({} persona): \"{}\"",
                improved.persona,
                snippet(&request.draft, DETAIL_CHARS)
            ),
        )
        .await;

    Ok(Json(improved))
}

/// POST /api/v1/tools/infofi-post
pub async fn handle_infofi_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<InfoFiRequest>,
) -> Result<Json<InfoFiPost>, AppError> {
    let post = generate_infofi_post(&state.llm, &request).await?;

    state
        .activity
        .record_quietly(
            &user,
            Feature::InfoFiContent,
            "Generated Post",
            format!(
                "Generated {} variations from: \"{}\"",
                post.optimized_posts.len(),
                snippet(&request.source_material, DETAIL_CHARS)
            ),
        )
        .await;

    Ok(Json(post))
}

/// POST /api/v1/tools/thread
pub async fn handle_thread(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ThreadRequest>,
) -> Result<Json<Thread>, AppError> {
    let thread = generate_thread(&state.llm, &request).await?;

    state
        .activity
        .record_quietly(
            &user,
            Feature::ThreadGenerator,
            "Generated Thread",
            format!(
                "Generated a {}-post thread on: \"{}\"",
                request.num_posts,
                snippet(&request.source_material, DETAIL_CHARS)
            ),
        )
        .await;

    Ok(Json(thread))
}

/// POST /api/v1/tools/content-ideas
pub async fn handle_content_ideas(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ContentIdeasRequest>,
) -> Result<Json<ContentIdeas>, AppError> {
    let ideas = generate_content_ideas(&state.llm, &request).await?;

    state
        .activity
        .record_quietly(
            &user,
            Feature::ContentIdeas,
            "Generated Ideas",
            format!("Brainstormed on: \"{}\"", snippet(&request.topic, DETAIL_CHARS)),
        )
        .await;

    Ok(Json(ideas))
}

/// POST /api/v1/tools/reply
pub async fn handle_reply(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<Reply>, AppError> {
    let reply = generate_reply(&state.llm, &request).await?;

    state
        .activity
        .record_quietly(
            &user,
            Feature::AuthenticReply,
            "Generated Reply",
            format!(
                "Replied to post: \"{}\"",
                snippet(&request.original_post, DETAIL_CHARS)
            ),
        )
        .await;

    Ok(Json(reply))
}

/// POST /api/v1/tools/post-mortem
pub async fn handle_post_mortem(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<PostMortemRequest>,
) -> Result<Json<PostMortem>, AppError> {
    let analysis = analyze_post(&state.llm, &request).await?;

    if !analysis.degraded {
        state
            .activity
            .record_quietly(
                &user,
                Feature::PostMortemAnalyzer,
                "Analyzed Post",
                format!(
                    "Analyzed post: \"{}\"",
                    snippet(&request.post_text, DETAIL_CHARS)
                ),
            )
            .await;
    }

    Ok(Json(analysis))
}

/// POST /api/v1/tools/persona
pub async fn handle_persona(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<PersonaRequest>,
) -> Result<Json<GeneratedPersona>, AppError> {
    let persona = generate_persona(&state.llm, &request).await?;

    state
        .activity
        .record_quietly(
            &user,
            Feature::PersonaGenerator,
            "Generated Persona",
            format!("Built a persona from {} posts", request.posts.len()),
        )
        .await;

    Ok(Json(persona))
}

/// POST /api/v1/tools/draft-suggestions
pub async fn handle_draft_suggestions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<DraftSuggestionsRequest>,
) -> Result<Json<DraftSuggestions>, AppError> {
    let suggestions = generate_draft_suggestions(&state.llm, &request).await?;

    state
        .activity
        .record_quietly(
            &user,
            Feature::DraftSuggestions,
            "Generated Suggestions",
            format!(
                "Suggested drafts for: \"{}\"",
                snippet(&request.trending_topic, DETAIL_CHARS)
            ),
        )
        .await;

    Ok(Json(suggestions))
}
