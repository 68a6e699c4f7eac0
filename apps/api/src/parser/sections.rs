//! Heuristic conversion of extracted resume text into a `ResumeRecord`.
//!
//! Flow: contact details from the whole text → split into sections by header
//! lines → one small extractor per section. Every extractor tolerates missing
//! or oddly formatted input and falls back to leaving fields empty.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeRecord, Skills};
use crate::scoring::vocabulary::{TermList, TECHNICAL};

/// Header lines longer than this are treated as content.
const MAX_HEADER_WORDS: usize = 5;
const SUMMARY_SENTENCES: usize = 3;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern")
});
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+(]?\d[\d .()-]{7,}\d").expect("phone pattern"));
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s|,;]+|\b(?:linkedin\.com|github\.com)/[^\s|,;]+")
        .expect("url pattern")
});
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern"));
static GPA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d\.\d{1,2}(?:\s*/\s*\d(?:\.\d{1,2})?)?").expect("gpa pattern")
});
static DEGREE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:bachelor|master|doctor(?:ate)?|associate|diploma)s?\b")
        .expect("degree word pattern")
});
static DEGREE_ABBR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w.])(?:Ph\.?D|B\.?Sc?|M\.?Sc?|B\.?A|M\.?A|B\.?E|M\.?E|B\.?Tech|M\.?Tech|MBA)\.?(?:[^\w]|$)")
        .expect("degree abbreviation pattern")
});
static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{4}\b")
        .expect("month-year pattern")
});
/// Language and tool names that mark a skill as technical on top of the scoring
/// vocabulary. Kept out of keyword scoring, where words like "go" are noise.
static SKILL_TECH_NAMES: Lazy<TermList> = Lazy::new(|| {
    TermList::new(&[
        "rust", "go", "golang", "c", "c++", "c#", "kotlin", "swift", "ruby", "php", "scala",
        "bash", "html", "css", "terraform", "graphql", "redis", "spark", "tensorflow",
        "pytorch", "excel", "tableau", "figma",
    ])
});
static ONGOING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:present|current|now)\b").expect("ongoing pattern"));

const BULLET_GLYPHS: &[char] = &['•', '-', '*', '▪', '●', '◦', '‣', '–', '·'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    const KEYWORDS: &'static [(SectionKind, &'static [&'static str])] = &[
        (SectionKind::Experience, &["experience", "employment", "work history"]),
        (SectionKind::Education, &["education", "academic", "qualification"]),
        (SectionKind::Skills, &["skills", "competencies"]),
        (SectionKind::Projects, &["projects", "portfolio"]),
        (SectionKind::Certifications, &["certifications", "certificates", "licenses"]),
        (SectionKind::Summary, &["summary", "profile", "objective", "about"]),
    ];

    /// Recognises a header line, returning the section and any text that
    /// followed a colon on the same line (`Skills: Rust, Go`).
    fn detect(line: &str) -> Option<(SectionKind, Option<String>)> {
        if is_bullet(line) || line.contains('@') || URL.is_match(line) {
            return None;
        }
        let (head, rest) = match line.split_once(':') {
            Some((head, rest)) => (head, Some(rest.trim().to_string()).filter(|r| !r.is_empty())),
            None => (line, None),
        };
        let head = head.trim().to_lowercase();
        if head.is_empty() || head.split_whitespace().count() > MAX_HEADER_WORDS {
            return None;
        }
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| head.contains(w)))
            .map(|(kind, _)| (*kind, rest))
    }
}

/// Result of turning raw upload text into a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub resume: ResumeRecord,
    pub raw_text: String,
    pub sections_found: Vec<SectionKind>,
}

pub fn parse_resume_text(text: &str) -> ParsedResume {
    let (sections, order) = split_into_sections(text);
    let section = |kind: SectionKind| sections.get(&kind).map(Vec::as_slice).unwrap_or(&[]);

    let resume = ResumeRecord {
        personal_info: extract_personal_info(text),
        summary: extract_summary(section(SectionKind::Summary)),
        education: extract_education(section(SectionKind::Education)),
        experience: extract_experience(section(SectionKind::Experience)),
        projects: extract_projects(section(SectionKind::Projects)),
        skills: extract_skills(section(SectionKind::Skills)),
    };

    ParsedResume {
        resume,
        raw_text: text.to_string(),
        sections_found: order,
    }
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLET_GLYPHS)
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(BULLET_GLYPHS).trim()
}

fn split_into_sections(text: &str) -> (HashMap<SectionKind, Vec<String>>, Vec<SectionKind>) {
    let mut sections: HashMap<SectionKind, Vec<String>> = HashMap::new();
    let mut order = Vec::new();
    let mut current: Option<SectionKind> = None;

    for line in non_empty_lines(text) {
        if let Some((kind, inline)) = SectionKind::detect(line) {
            // `Soft Skills: ...` inside a skills section keeps its label.
            if current == Some(kind) && inline.is_some() {
                sections.entry(kind).or_default().push(line.to_string());
                continue;
            }
            current = Some(kind);
            if !order.contains(&kind) {
                order.push(kind);
            }
            sections.entry(kind).or_default().extend(inline);
            continue;
        }
        if let Some(kind) = current {
            sections.entry(kind).or_default().push(line.to_string());
        }
    }

    (sections, order)
}

fn extract_personal_info(text: &str) -> PersonalInfo {
    let email = EMAIL.find(text).map(|m| m.as_str().to_string()).unwrap_or_default();

    let phone = PHONE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            (10..=15).contains(&digits) && !YEAR_RANGE.is_match(candidate)
        })
        .unwrap_or_default()
        .to_string();

    let name = non_empty_lines(text)
        .find(|line| {
            !line.contains('@') && !URL.is_match(line) && SectionKind::detect(line).is_none()
        })
        .unwrap_or_default()
        .to_string();

    let urls: Vec<String> = URL
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ')', ']']).to_string())
        .collect();
    let pick = |needle: &str| {
        urls.iter()
            .find(|u| u.to_lowercase().contains(needle))
            .cloned()
            .unwrap_or_default()
    };
    let linkedin = pick("linkedin");
    let github = pick("github");
    let portfolio = urls
        .iter()
        .find(|u| **u != linkedin && **u != github)
        .cloned()
        .unwrap_or_default();

    PersonalInfo {
        name,
        email,
        phone,
        linkedin,
        github,
        portfolio,
    }
}

/// `2019 - 2021` style ranges look like phone numbers to the phone pattern.
static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:19|20)\d{2}\s*[-–]\s*(?:19|20)\d{2}$").expect("year range pattern")
});

fn extract_summary(lines: &[String]) -> String {
    let text = lines.join(" ");
    let mut sentences = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    for (i, &(idx, c)) in chars.iter().enumerate() {
        let at_boundary = chars.get(i + 1).map_or(true, |(_, next)| next.is_whitespace());
        if matches!(c, '.' | '!' | '?') && at_boundary {
            let end = idx + c.len_utf8();
            sentences.push(text[start..end].trim().to_string());
            start = end;
            if sentences.len() == SUMMARY_SENTENCES {
                break;
            }
        }
    }
    if sentences.len() < SUMMARY_SENTENCES {
        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
    }
    sentences.retain(|s| !s.is_empty());
    sentences.join(" ")
}

fn is_degree_line(line: &str) -> bool {
    DEGREE_WORD.is_match(line) || DEGREE_ABBR.is_match(line)
}

fn extract_education(lines: &[String]) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut current: Option<EducationEntry> = None;
    let mut pending_institution: Option<String> = None;

    for line in lines.iter().map(|l| strip_bullet(l)) {
        if is_degree_line(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            let mut entry = EducationEntry {
                degree: YEAR.replace_all(line, "").trim_matches([' ', ',', '-', '|']).to_string(),
                institution: pending_institution.take().unwrap_or_default(),
                ..Default::default()
            };
            fill_education_details(&mut entry, line);
            current = Some(entry);
            continue;
        }

        match current.as_mut() {
            Some(entry) => {
                fill_education_details(entry, line);
                if entry.institution.is_empty() && !YEAR.is_match(line) && !is_gpa_line(line) {
                    entry.institution = line.to_string();
                }
            }
            None => {
                if !YEAR.is_match(line) {
                    pending_institution = Some(line.to_string());
                }
            }
        }
    }

    entries.extend(current);
    entries
}

fn is_gpa_line(line: &str) -> bool {
    line.to_lowercase().contains("gpa")
}

fn fill_education_details(entry: &mut EducationEntry, line: &str) {
    if let Some(year) = YEAR.find_iter(line).last() {
        entry.graduation_date = year.as_str().to_string();
    }
    if entry.gpa.is_empty() {
        let explicit = is_gpa_line(line);
        if let Some(m) = GPA.find(line) {
            if explicit || m.as_str().contains('/') {
                entry.gpa = m.as_str().replace(' ', "");
            }
        }
    }
}

/// Splits `Title | Company` or `Title, Company` left over on a date line.
fn title_and_company(rest: &str) -> (String, String) {
    let mut parts = rest
        .split(['|', ',', '–', '—'])
        .map(|p| p.trim().trim_matches(['-', '(', ')']).trim())
        .filter(|p| !p.is_empty());
    let title = parts.next().unwrap_or_default().to_string();
    let company = parts.next().unwrap_or_default().to_string();
    (title, company)
}

fn extract_experience(lines: &[String]) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ExperienceEntry> = None;
    // Non-bullet lines whose owner is not known yet: trailing text of the
    // current entry, or the title/company of the next one.
    let mut pending: Vec<String> = Vec::new();

    for line in lines {
        let dates: Vec<&str> = MONTH_YEAR.find_iter(line).map(|m| m.as_str()).collect();
        if let Some(start) = dates.first() {
            let rest = ONGOING.replace_all(&MONTH_YEAR.replace_all(line, ""), "").to_string();
            let (mut title, mut company) = title_and_company(&rest);

            let needed = usize::from(title.is_empty()) + usize::from(company.is_empty());
            let leading = pending.split_off(pending.len().saturating_sub(needed));
            if let Some(mut done) = current.take() {
                done.responsibilities.append(&mut pending);
                entries.push(done);
            }
            pending.clear();

            let mut leading = leading.into_iter();
            if title.is_empty() {
                title = leading.next().unwrap_or_default();
            }
            if company.is_empty() {
                company = leading.next().unwrap_or_default();
            }

            current = Some(ExperienceEntry {
                title,
                company,
                start_date: start.to_string(),
                end_date: dates
                    .get(1)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "Present".to_string()),
                responsibilities: Vec::new(),
            });
            continue;
        }

        let text = strip_bullet(line).to_string();
        if text.is_empty() {
            continue;
        }
        match current.as_mut() {
            Some(entry) if is_bullet(line) => {
                entry.responsibilities.append(&mut pending);
                entry.responsibilities.push(text);
            }
            Some(entry) if entry.title.is_empty() => entry.title = text,
            Some(entry) if entry.company.is_empty() => entry.company = text,
            Some(_) => pending.push(text),
            None if !is_bullet(line) => pending.push(text),
            None => {}
        }
    }

    if let Some(mut last) = current {
        last.responsibilities.append(&mut pending);
        entries.push(last);
    }
    entries
}

fn extract_skills(lines: &[String]) -> Skills {
    let mut skills = Skills::default();

    for line in lines.iter().map(|l| strip_bullet(l)) {
        let (label, items) = match line.split_once(':') {
            Some((label, items)) => (label.to_lowercase(), items),
            None => (String::new(), line),
        };
        for item in items
            .split([',', ';', '|', '•'])
            .map(str::trim)
            .filter(|i| !i.is_empty())
        {
            let item = item.to_string();
            let goes_soft = if label.contains("soft") || label.contains("interpersonal") {
                true
            } else if label.contains("technical") || label.contains("language") || label.contains("tool") {
                false
            } else {
                !is_technical_skill(&item)
            };
            if goes_soft {
                skills.soft.insert(item);
            } else {
                skills.technical.insert(item);
            }
        }
    }

    skills
}

fn is_technical_skill(item: &str) -> bool {
    !TECHNICAL.matches(item).is_empty() || !SKILL_TECH_NAMES.matches(item).is_empty()
}

fn is_project_title(line: &str) -> bool {
    if is_bullet(line) {
        return false;
    }
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    if !letters.is_empty() && letters.iter().all(|c| c.is_uppercase()) {
        return true;
    }
    line.chars().next().is_some_and(char::is_uppercase)
        && line.split_whitespace().count() <= 8
        && !line.ends_with('.')
}

fn extract_projects(lines: &[String]) -> Vec<ProjectEntry> {
    let mut projects: Vec<ProjectEntry> = Vec::new();

    for line in lines {
        let lower = line.to_lowercase();
        if lower.starts_with("technologies") || lower.starts_with("tech stack") {
            if let Some(project) = projects.last_mut() {
                project.technologies = line
                    .split_once(':')
                    .map(|(_, t)| t.trim().to_string())
                    .unwrap_or_default();
            }
            continue;
        }

        if is_project_title(line) {
            let (name, technologies) = match line.split_once('|') {
                Some((name, tech)) => (name.trim().to_string(), tech.trim().to_string()),
                None => (line.trim().to_string(), String::new()),
            };
            projects.push(ProjectEntry {
                name,
                description: String::new(),
                technologies,
            });
            continue;
        }

        if let Some(project) = projects.last_mut() {
            let text = strip_bullet(line);
            if !project.description.is_empty() {
                project.description.push(' ');
            }
            project.description.push_str(text);
        }
    }

    projects
}
