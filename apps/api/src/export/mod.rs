// Export: Word bytes written in-process, LaTeX source from the template
// filler, PDF through the external toolchain behind `PdfRenderer`.

pub mod docx;
pub mod handlers;
pub mod pdf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::templates::{fill_template, TemplateChoice};
use pdf::PdfRenderer;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Docx,
    Pdf,
    Latex,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Latex => "tex",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Docx => DOCX_CONTENT_TYPE,
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Latex => "application/x-tex",
        }
    }
}

#[derive(Debug)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub filename: String,
}

/// Renders `record` in `format`. PDF goes through `renderer`; the other two
/// formats never touch it.
pub async fn export_resume(
    record: &ResumeRecord,
    template: TemplateChoice,
    format: ExportFormat,
    renderer: &dyn PdfRenderer,
) -> Result<ExportedFile, AppError> {
    let bytes = match format {
        ExportFormat::Docx => docx::render_docx(record, template)?,
        ExportFormat::Latex => fill_template(record, template).into_bytes(),
        ExportFormat::Pdf => renderer.render(&fill_template(record, template)).await?,
    };

    let filename = format!(
        "{}_{}.{}",
        file_stem(&record.personal_info.name),
        template.id(),
        format.extension()
    );
    info!("Exported {} ({} bytes)", filename, bytes.len());

    Ok(ExportedFile {
        bytes,
        format,
        filename,
    })
}

/// `Jane O'Doe` becomes `jane_o_doe_resume`; a blank name gives `resume`.
fn file_stem(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    if slug.is_empty() {
        "resume".to_string()
    } else {
        format!("{slug}_resume")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::export::pdf::RenderError;
    use crate::models::PersonalInfo;

    struct BrokenRenderer;

    #[async_trait]
    impl PdfRenderer for BrokenRenderer {
        async fn render(&self, _latex: &str) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::ProgramMissing("pdflatex".to_string()))
        }

        async fn is_available(&self) -> bool {
            false
        }
    }

    fn record() -> ResumeRecord {
        ResumeRecord {
            personal_info: PersonalInfo {
                name: "Jane O'Doe".to_string(),
                ..Default::default()
            },
            summary: "Engineer.".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_broken_renderer_leaves_word_export_working() {
        let pdf = export_resume(&record(), TemplateChoice::Modern, ExportFormat::Pdf, &BrokenRenderer).await;
        assert!(matches!(pdf, Err(AppError::PdfUnavailable(_))));

        let docx = export_resume(&record(), TemplateChoice::Modern, ExportFormat::Docx, &BrokenRenderer)
            .await
            .unwrap();
        assert_eq!(docx.filename, "jane_o_doe_resume_modern.docx");
        assert_eq!(&docx.bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_latex_export_is_filled_source() {
        let file = export_resume(&record(), TemplateChoice::Classic, ExportFormat::Latex, &BrokenRenderer)
            .await
            .unwrap();
        let source = String::from_utf8(file.bytes).unwrap();
        assert!(source.contains("Jane O'Doe"));
        assert!(source.contains(r"\section{Professional Summary}"));
        assert_eq!(file.format.content_type(), "application/x-tex");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("  "), "resume");
        assert_eq!(file_stem("Zoë Ng"), "zo_ng_resume");
    }
}
