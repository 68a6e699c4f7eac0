//! Raw text extraction from uploaded PDF and DOCX files.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use zip::ZipArchive;

use crate::parser::ParseError;

const DOCX_BODY_PART: &str = "word/document.xml";

/// Upload formats the parser understands, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Result<Self, ParseError> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            _ => Err(ParseError::UnsupportedExtension(ext)),
        }
    }
}

/// Extracts plain text, one line per paragraph.
///
/// PDF extraction is CPU-bound and can panic on malformed input, so it runs
/// on the blocking pool and a panic is reported as a parse failure.
pub async fn extract_text(kind: DocumentKind, bytes: bytes::Bytes) -> Result<String, ParseError> {
    let text = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => extract_pdf_text(&bytes),
        DocumentKind::Docx => extract_docx_text(&bytes),
    })
    .await
    .map_err(|e| ParseError::Pdf(format!("extraction task failed: {e}")))??;

    debug!("Extracted {} chars from {:?} upload", text.len(), kind);

    if text.trim().is_empty() {
        return Err(ParseError::NoText);
    }
    Ok(text)
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ParseError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ParseError::Pdf(e.to_string()))
}

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ParseError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ParseError::Docx(e.to_string()))?;
    let mut entry = archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ParseError::Docx(format!("{DOCX_BODY_PART}: {e}")))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ParseError::Docx(e.to_string()))?;
    Ok(document_xml_to_text(&xml))
}

/// Text runs, tabs and line breaks inside a WordprocessingML paragraph.
static RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:(tab|br|cr)\s*/>")
        .expect("run pattern is a valid regex")
});

fn document_xml_to_text(xml: &str) -> String {
    xml.split("</w:p>")
        .map(|paragraph| {
            let mut line = String::new();
            for cap in RUN.captures_iter(paragraph) {
                match (cap.get(1), cap.get(2).map(|m| m.as_str())) {
                    (Some(text), _) => line.push_str(&unescape_xml(text.as_str())),
                    (None, Some("tab")) => line.push('\t'),
                    (None, Some(_)) => line.push('\n'),
                    (None, None) => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

static XML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]+)|#([0-9]+)|(lt|gt|quot|apos|amp));")
        .expect("xml entity pattern")
});

/// Decodes the predefined XML entities and numeric character references in
/// one pass. Unknown or out-of-range references are left untouched.
fn unescape_xml(text: &str) -> String {
    XML_ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str().parse().ok().and_then(char::from_u32)
            } else {
                match caps.get(3).map(|m| m.as_str()) {
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    Some("quot") => Some('"'),
                    Some("apos") => Some('\''),
                    Some("amp") => Some('&'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}
