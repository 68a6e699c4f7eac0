//! LaTeX fragments for each skeleton placeholder.
//!
//! Each section builder returns the complete section, heading included, or an
//! empty string when the record has nothing to show there.

use std::fmt::Write;

use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, Skills};

/// Escapes text for use in LaTeX body content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '•' => out.push_str(r"\textbullet{}"),
            '–' => out.push_str("--"),
            '—' => out.push_str("---"),
            '\n' | '\r' | '\t' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a URL for the first argument of `\href`, adding a scheme when the
/// user typed a bare domain.
fn escape_url(url: &str) -> String {
    let url = url.trim();
    let url = if url.contains("://") || url.starts_with("mailto:") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    url.chars()
        .filter(|c| !matches!(c, '{' | '}' | '\\') && !c.is_whitespace())
        .fold(String::with_capacity(url.len()), |mut out, c| {
            if matches!(c, '%' | '#') {
                out.push('\\');
            }
            out.push(c);
            out
        })
}

pub fn contact_line(info: &PersonalInfo) -> String {
    let mut items = Vec::new();
    if !info.phone.trim().is_empty() {
        items.push(escape(info.phone.trim()));
    }
    if !info.email.trim().is_empty() {
        items.push(format!(
            r"\href{{{}}}{{\underline{{{}}}}}",
            escape_url(&format!("mailto:{}", info.email.trim())),
            escape(info.email.trim())
        ));
    }
    for (url, label) in [
        (&info.linkedin, "LinkedIn"),
        (&info.github, "GitHub"),
        (&info.portfolio, "Portfolio"),
    ] {
        if !url.trim().is_empty() {
            items.push(format!(r"\href{{{}}}{{\underline{{{label}}}}}", escape_url(url)));
        }
    }
    items.join(r" $|$ ")
}

pub fn summary_section(summary: &str) -> String {
    if summary.trim().is_empty() {
        return String::new();
    }
    format!("\\section{{Professional Summary}}\n{}\n", escape(summary.trim()))
}

pub fn education_section(education: &[EducationEntry]) -> String {
    let entries: Vec<&EducationEntry> = education.iter().filter(|e| !e.is_blank()).collect();
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::from("\\section{Education}\n\\resumeSubHeadingListStart\n");
    for edu in entries {
        let gpa = if edu.gpa.trim().is_empty() {
            String::new()
        } else {
            format!("GPA: {}", escape(edu.gpa.trim()))
        };
        let _ = writeln!(
            out,
            "  \\resumeSubheading\n    {{{}}}{{{}}}\n    {{{}}}{{{}}}",
            escape(edu.degree.trim()),
            escape(edu.graduation_date.trim()),
            escape(edu.institution.trim()),
            gpa
        );
    }
    out.push_str("\\resumeSubHeadingListEnd\n");
    out
}

fn item_list(out: &mut String, items: &[&str]) {
    if items.is_empty() {
        return;
    }
    out.push_str("    \\resumeItemListStart\n");
    for item in items {
        let _ = writeln!(out, "      \\resumeItem{{{}}}", escape(item));
    }
    out.push_str("    \\resumeItemListEnd\n");
}

fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (start, "") => escape(start),
        ("", end) => escape(end),
        (start, end) => format!("{} -- {}", escape(start), escape(end)),
    }
}

pub fn experience_section(experience: &[ExperienceEntry]) -> String {
    let entries: Vec<&ExperienceEntry> = experience.iter().filter(|e| !e.is_blank()).collect();
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::from("\\section{Experience}\n\\resumeSubHeadingListStart\n");
    for exp in entries {
        let _ = writeln!(
            out,
            "  \\resumeSubheading\n    {{{}}}{{{}}}\n    {{{}}}{{}}",
            escape(exp.title.trim()),
            date_range(&exp.start_date, &exp.end_date),
            escape(exp.company.trim())
        );
        let bullets: Vec<&str> = exp
            .responsibilities
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .collect();
        item_list(&mut out, &bullets);
    }
    out.push_str("\\resumeSubHeadingListEnd\n");
    out
}

pub fn skills_section(skills: &Skills) -> String {
    let mut lines = Vec::new();
    for (label, set) in [("Technical Skills", &skills.technical), ("Soft Skills", &skills.soft)] {
        if set.is_empty() {
            continue;
        }
        let list: Vec<String> = set.iter().map(|s| escape(s.trim())).collect();
        lines.push(format!(r"\textbf{{{label}}}{{: {}}}", list.join(", ")));
    }
    if lines.is_empty() {
        return String::new();
    }

    format!(
        "\\section{{Skills}}\n\\begin{{itemize}}[leftmargin=0.15in, label={{}}]\n  \\small{{\\item{{\n    {}\n  }}}}\n\\end{{itemize}}\n",
        lines.join(" \\\\\n    ")
    )
}

pub fn projects_section(projects: &[ProjectEntry]) -> String {
    let entries: Vec<&ProjectEntry> = projects.iter().filter(|p| !p.is_blank()).collect();
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::from("\\section{Projects}\n\\resumeSubHeadingListStart\n");
    for project in entries {
        let heading = if project.technologies.trim().is_empty() {
            format!(r"\textbf{{{}}}", escape(project.name.trim()))
        } else {
            format!(
                r"\textbf{{{}}} $|$ \emph{{{}}}",
                escape(project.name.trim()),
                escape(project.technologies.trim())
            )
        };
        let _ = writeln!(out, "  \\resumeProjectHeading\n    {{{heading}}}{{}}");
        let description = project.description.trim();
        if !description.is_empty() {
            item_list(&mut out, &[description]);
        }
    }
    out.push_str("\\resumeSubHeadingListEnd\n");
    out
}
