use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{export_resume, pdf::RenderError, ExportFormat};
use crate::models::ResumeRecord;
use crate::state::AppState;
use crate::templates::TemplateChoice;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub resume: ResumeRecord,
    #[serde(default)]
    pub template: TemplateChoice,
}

/// POST /api/v1/resumes/export/:format
///
/// `format` is one of `docx`, `pdf`, `latex`. Responds with the file as an
/// attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(format): Path<ExportFormat>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    if format == ExportFormat::Pdf && !state.pdf_available {
        return Err(AppError::PdfUnavailable(RenderError::ProgramMissing(
            state.config.latex_program.clone(),
        )));
    }

    let file = export_resume(
        &request.resume,
        request.template,
        format,
        state.renderer.as_ref(),
    )
    .await?;

    let headers = [
        (header::CONTENT_TYPE, file.format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
    ];
    Ok((headers, file.bytes).into_response())
}
