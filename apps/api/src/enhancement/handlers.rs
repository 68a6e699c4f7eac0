//! Axum route handlers for the Enhancement API.
//!
//! Every handler here answers `ENHANCEMENT_DISABLED` when the service was
//! started without a Gemini key.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enhancement::Enhancer;
use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::scoring::ScoreReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub original: ResumeRecord,
    pub enhanced: ResumeRecord,
    pub original_score: ScoreReport,
    pub enhanced_score: ScoreReport,
    /// Enhanced total minus original total; may be negative.
    pub improvement: i64,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

fn enhancer(state: &AppState) -> Result<&Enhancer, AppError> {
    state.enhancer.as_ref().ok_or(AppError::EnhancementDisabled)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/enhance
///
/// Rewrites the record and scores both versions.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(original): Json<ResumeRecord>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let enhancer = enhancer(&state)?;

    let original_score = state.scorer.score(&original);
    let enhanced = enhancer.enhance_resume(&original).await;
    let enhanced_score = state.scorer.score(&enhanced);
    let improvement = i64::from(enhanced_score.total) - i64::from(original_score.total);

    info!(
        "Enhancement complete: score {} -> {} ({:+})",
        original_score.total, enhanced_score.total, improvement
    );

    Ok(Json(EnhanceResponse {
        original,
        enhanced,
        original_score,
        enhanced_score,
        improvement,
    }))
}

/// POST /api/v1/resumes/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(record): Json<ResumeRecord>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let suggestions = enhancer(&state)?.improvement_suggestions(&record).await?;
    Ok(Json(SuggestionsResponse { suggestions }))
}

/// POST /api/v1/resumes/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let enhancer = enhancer(&state)?;
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let answer = enhancer
        .chat_feedback(request.question.trim(), &request.resume)
        .await?;
    Ok(Json(ChatResponse { answer }))
}
