// Upload parsing: PDF/DOCX text extraction, then heuristic sectioning into a
// ResumeRecord. Anything the heuristics miss is left empty for manual entry.

pub mod extract;
pub mod handlers;
pub mod sections;

use thiserror::Error;
use tracing::info;

pub use extract::DocumentKind;
pub use sections::{parse_resume_text, ParsedResume};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported file extension '{0}'")]
    UnsupportedExtension(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("document contains no extractable text")]
    NoText,
}

/// Extracts and sections an uploaded resume file.
pub async fn parse_upload(filename: &str, bytes: bytes::Bytes) -> Result<ParsedResume, ParseError> {
    let kind = DocumentKind::from_filename(filename)?;
    let size = bytes.len();
    let text = extract::extract_text(kind, bytes).await?;
    let parsed = parse_resume_text(&text);

    info!(
        "Parsed {:?} upload '{}' ({} bytes): sections={:?}",
        kind, filename, size, parsed.sections_found
    );
    Ok(parsed)
}
