//! Axum route handlers for scoring and manual-entry validation.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::scoring::ats::ScoreReport;
use crate::state::AppState;

/// POST /api/v1/resumes/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(record): Json<ResumeRecord>,
) -> Result<Json<ScoreReport>, AppError> {
    let report = state.scorer.score(&record);
    info!(
        "Scored resume: total={} band={:?} missing={}",
        report.total,
        report.band,
        report.missing_sections.len()
    );
    Ok(Json(report))
}

/// POST /api/v1/resumes/validate
///
/// Checks the fields the manual entry form marks as required.
pub async fn handle_validate(Json(record): Json<ResumeRecord>) -> Result<StatusCode, AppError> {
    let missing = record.missing_required_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Please fill all required fields: {}",
            missing.join(", ")
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
