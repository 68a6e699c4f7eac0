use axum::{extract::Multipart, Json};
use tracing::warn;

use crate::errors::AppError;
use crate::parser::{parse_upload, ParsedResume};

const FILE_FIELD: &str = "file";

/// POST /api/v1/resumes/parse
///
/// Multipart upload with a single `file` field (PDF or DOCX).
pub async fn handle_parse(mut multipart: Multipart) -> Result<Json<ParsedResume>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            warn!("Ignoring unexpected multipart field {:?}", field.name());
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        let parsed = parse_upload(&filename, bytes).await?;
        return Ok(Json(parsed));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
