//! Word export: writes a minimal WordprocessingML package in memory.
//!
//! The package holds only the parts Word needs to open a document: content
//! types, package relationships, `word/document.xml` and `word/styles.xml`.
//! Bullets are plain paragraphs with a hanging indent, so no numbering part
//! is required.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::models::ResumeRecord;
use crate::templates::TemplateChoice;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// US letter with half-inch margins, in twentieths of a point.
const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="720" w:right="720" w:bottom="720" w:left="720" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#;

// ────────────────────────────────────────────────────────────────────────────
// Per-template styling
// ────────────────────────────────────────────────────────────────────────────

/// Sizes are in half-points, as WordprocessingML stores them.
struct DocxStyle {
    font: &'static str,
    accent: &'static str,
    name_size: u32,
    heading_size: u32,
    heading_small_caps: bool,
    heading_centered: bool,
}

impl DocxStyle {
    fn for_template(choice: TemplateChoice) -> Self {
        match choice {
            TemplateChoice::Professional => DocxStyle {
                font: "Calibri",
                accent: "000000",
                name_size: 48,
                heading_size: 28,
                heading_small_caps: false,
                heading_centered: false,
            },
            TemplateChoice::Modern => DocxStyle {
                font: "Arial",
                accent: "0066CC",
                name_size: 52,
                heading_size: 28,
                heading_small_caps: false,
                heading_centered: false,
            },
            TemplateChoice::Classic => DocxStyle {
                font: "Times New Roman",
                accent: "000000",
                name_size: 40,
                heading_size: 24,
                heading_small_caps: true,
                heading_centered: true,
            },
        }
    }

    fn styles_xml(&self) -> String {
        let heading_caps = if self.heading_small_caps { "<w:smallCaps/>" } else { "<w:caps/>" };
        let heading_jc = if self.heading_centered { r#"<w:jc w:val="center"/>"# } else { "" };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{WORD_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="60" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/><w:spacing w:after="0"/></w:pPr><w:rPr><w:b/><w:color w:val="{accent}"/><w:sz w:val="{name_size}"/><w:szCs w:val="{name_size}"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Contact"><w:name w:val="Contact"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/><w:spacing w:after="240"/></w:pPr><w:rPr><w:sz w:val="20"/><w:szCs w:val="20"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:pBdr><w:bottom w:val="single" w:sz="6" w:space="1" w:color="{accent}"/></w:pBdr><w:spacing w:before="240" w:after="80"/>{heading_jc}<w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/>{heading_caps}<w:color w:val="{accent}"/><w:sz w:val="{heading_size}"/><w:szCs w:val="{heading_size}"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:ind w:left="360" w:hanging="360"/><w:spacing w:after="20"/></w:pPr><w:rPr><w:sz w:val="20"/><w:szCs w:val="20"/></w:rPr></w:style></w:styles>"#,
            font = self.font,
            accent = self.accent,
            name_size = self.name_size,
            heading_size = self.heading_size,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document body
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Run<'a> {
    text: &'a str,
    bold: bool,
    italic: bool,
    size: Option<u32>,
}

impl<'a> Run<'a> {
    fn plain(text: &'a str) -> Self {
        Run {
            text,
            ..Default::default()
        }
    }

    fn bold(text: &'a str) -> Self {
        Run {
            text,
            bold: true,
            ..Default::default()
        }
    }

    fn italic(text: &'a str, size: u32) -> Self {
        Run {
            text,
            italic: true,
            size: Some(size),
            ..Default::default()
        }
    }
}

#[derive(Default)]
struct Body {
    xml: String,
}

impl Body {
    fn paragraph(&mut self, style: Option<&str>, runs: &[Run]) {
        self.xml.push_str("<w:p>");
        if let Some(style) = style {
            self.xml.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#));
        }
        for run in runs.iter().filter(|r| !r.text.is_empty()) {
            self.xml.push_str("<w:r>");
            if run.bold || run.italic || run.size.is_some() {
                self.xml.push_str("<w:rPr>");
                if run.bold {
                    self.xml.push_str("<w:b/>");
                }
                if run.italic {
                    self.xml.push_str("<w:i/>");
                }
                if let Some(size) = run.size {
                    self.xml.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
                }
                self.xml.push_str("</w:rPr>");
            }
            self.xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape_xml(run.text)
            ));
        }
        self.xml.push_str("</w:p>");
    }

    fn heading(&mut self, text: &str) {
        self.paragraph(Some("Heading1"), &[Run::plain(text)]);
    }

    fn bullet(&mut self, text: &str) {
        let text = format!("•\u{a0}{}", text.trim());
        self.paragraph(Some("ListBullet"), &[Run::plain(&text)]);
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters are not allowed in XML 1.0.
            c if c.is_control() && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>, separator: &str) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn document_xml(record: &ResumeRecord) -> String {
    let mut body = Body::default();
    let info = &record.personal_info;

    body.paragraph(Some("Title"), &[Run::plain(info.name.trim())]);
    let contact = join_non_empty(
        [
            info.phone.as_str(),
            info.email.as_str(),
            info.linkedin.as_str(),
            info.github.as_str(),
            info.portfolio.as_str(),
        ],
        " | ",
    );
    body.paragraph(Some("Contact"), &[Run::plain(&contact)]);

    if record.has_summary() {
        body.heading("Professional Summary");
        body.paragraph(None, &[Run::plain(record.summary.trim())]);
    }

    if record.has_education() {
        body.heading("Education");
        for edu in record.education.iter().filter(|e| !e.is_blank()) {
            body.paragraph(
                None,
                &[
                    Run::bold(edu.degree.trim()),
                    Run::plain(if edu.institution.trim().is_empty() { "" } else { " - " }),
                    Run::plain(edu.institution.trim()),
                ],
            );
            let gpa = if edu.gpa.trim().is_empty() {
                String::new()
            } else {
                format!("GPA: {}", edu.gpa.trim())
            };
            let details = join_non_empty([edu.graduation_date.as_str(), gpa.as_str()], "  |  ");
            body.paragraph(None, &[Run::italic(&details, 20)]);
        }
    }

    if record.has_experience() {
        body.heading("Work Experience");
        for exp in record.experience.iter().filter(|e| !e.is_blank()) {
            body.paragraph(
                None,
                &[
                    Run::bold(exp.title.trim()),
                    Run::plain(if exp.company.trim().is_empty() { "" } else { " - " }),
                    Run::plain(exp.company.trim()),
                ],
            );
            let dates = join_non_empty([exp.start_date.as_str(), exp.end_date.as_str()], " - ");
            body.paragraph(None, &[Run::italic(&dates, 20)]);
            for item in exp.responsibilities.iter().filter(|r| !r.trim().is_empty()) {
                body.bullet(item);
            }
        }
    }

    if record.has_skills() {
        body.heading("Skills");
        for (label, set) in [
            ("Technical Skills: ", &record.skills.technical),
            ("Soft Skills: ", &record.skills.soft),
        ] {
            if set.is_empty() {
                continue;
            }
            let list = join_non_empty(set.iter().map(String::as_str), ", ");
            body.paragraph(None, &[Run::bold(label), Run::plain(&list)]);
        }
    }

    if record.has_projects() {
        body.heading("Projects");
        for project in record.projects.iter().filter(|p| !p.is_blank()) {
            let technologies = if project.technologies.trim().is_empty() {
                String::new()
            } else {
                format!(" | {}", project.technologies.trim())
            };
            body.paragraph(
                None,
                &[Run::bold(project.name.trim()), Run::italic(&technologies, 20)],
            );
            if !project.description.trim().is_empty() {
                body.paragraph(None, &[Run::plain(project.description.trim())]);
            }
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORD_NS}"><w:body>{}{SECTION_PROPERTIES}</w:body></w:document>"#,
        body.xml
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Package
// ────────────────────────────────────────────────────────────────────────────

/// Renders `record` as a .docx file styled after `choice`.
pub fn render_docx(record: &ResumeRecord, choice: TemplateChoice) -> Result<Vec<u8>> {
    let style = DocxStyle::for_template(choice);
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
        ("word/document.xml", document_xml(record)),
        ("word/styles.xml", style.styles_xml()),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to start docx part {name}"))?;
        zip.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write docx part {name}"))?;
    }
    let cursor = zip.finish().context("Failed to finish docx package")?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use crate::models::{ExperienceEntry, PersonalInfo, ProjectEntry};
    use crate::parser::extract::extract_docx_text;

    fn record() -> ResumeRecord {
        ResumeRecord {
            personal_info: PersonalInfo {
                name: "Jane <Doe> & Co".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
                ..Default::default()
            },
            summary: "Backend engineer.".to_string(),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "Jan 2020".to_string(),
                end_date: "Present".to_string(),
                responsibilities: vec!["Led team of 5".to_string()],
            }],
            projects: vec![ProjectEntry {
                name: "Ledger".to_string(),
                description: "Budgeting app.".to_string(),
                technologies: "Rust".to_string(),
            }],
            ..Default::default()
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = render_docx(&record(), TemplateChoice::Professional).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in ["[Content_Types].xml", "_rels/.rels", "word/document.xml", "word/styles.xml"] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn test_document_text_round_trips_through_parser() {
        let bytes = render_docx(&record(), TemplateChoice::Professional).unwrap();
        let text = extract_docx_text(&bytes).unwrap();
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

        assert_eq!(lines[0], "Jane <Doe> & Co");
        assert_eq!(lines[1], "555-0100 | jane@example.com");
        assert!(lines.contains(&"Professional Summary"));
        assert!(lines.contains(&"Engineer - Acme"));
        assert!(lines.contains(&"Jan 2020 - Present"));
        assert!(lines.contains(&"•\u{a0}Led team of 5"));
        assert!(lines.contains(&"Ledger | Rust"));
        assert!(!lines.contains(&"Education"));
        assert!(!lines.contains(&"Skills"));
    }

    #[test]
    fn test_text_is_xml_escaped() {
        let bytes = render_docx(&record(), TemplateChoice::Professional).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains("Jane &lt;Doe&gt; &amp; Co"));
    }

    #[test]
    fn test_styles_follow_template() {
        let modern = render_docx(&record(), TemplateChoice::Modern).unwrap();
        let styles = read_part(&modern, "word/styles.xml");
        assert!(styles.contains(r#"w:ascii="Arial""#));
        assert!(styles.contains(r#"<w:color w:val="0066CC"/>"#));

        let classic = render_docx(&record(), TemplateChoice::Classic).unwrap();
        let styles = read_part(&classic, "word/styles.xml");
        assert!(styles.contains(r#"w:ascii="Times New Roman""#));
        assert!(styles.contains("<w:smallCaps/>"));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        assert_eq!(escape_xml("a\u{0}b\u{1b}c\td"), "abc\td");
    }
}
