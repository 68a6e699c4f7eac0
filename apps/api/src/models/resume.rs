use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Contact block at the top of a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
}

impl PersonalInfo {
    pub fn has_professional_link(&self) -> bool {
        is_filled(&self.linkedin) || is_filled(&self.github)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub graduation_date: String,
    pub gpa: String,
}

impl EducationEntry {
    pub fn is_blank(&self) -> bool {
        !is_filled(&self.degree) && !is_filled(&self.institution)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    /// Ordered responsibility / achievement bullets, without bullet glyphs.
    pub responsibilities: Vec<String>,
}

impl ExperienceEntry {
    pub fn is_blank(&self) -> bool {
        !is_filled(&self.title)
            && !is_filled(&self.company)
            && self.responsibilities.iter().all(|r| !is_filled(r))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: String,
}

impl ProjectEntry {
    pub fn is_blank(&self) -> bool {
        !is_filled(&self.name) && !is_filled(&self.description)
    }
}

/// Skill strings, kept as two sorted sets so output order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: BTreeSet<String>,
    pub soft: BTreeSet<String>,
}

impl Skills {
    pub fn has_technical(&self) -> bool {
        self.technical.iter().any(|s| is_filled(s))
    }

    pub fn has_soft(&self) -> bool {
        self.soft.iter().any(|s| is_filled(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.technical.iter().chain(self.soft.iter())
    }
}

/// A full resume as parsed from an upload or entered by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Skills,
}

impl ResumeRecord {
    pub fn has_name(&self) -> bool {
        is_filled(&self.personal_info.name)
    }

    pub fn has_summary(&self) -> bool {
        is_filled(&self.summary)
    }

    pub fn has_education(&self) -> bool {
        self.education.iter().any(|e| !e.is_blank())
    }

    pub fn has_experience(&self) -> bool {
        self.experience.iter().any(|e| !e.is_blank())
    }

    pub fn has_projects(&self) -> bool {
        self.projects.iter().any(|p| !p.is_blank())
    }

    pub fn has_skills(&self) -> bool {
        self.skills.has_technical() || self.skills.has_soft()
    }

    /// All responsibility bullets across experience entries, in order.
    pub fn bullets(&self) -> impl Iterator<Item = &str> {
        self.experience
            .iter()
            .flat_map(|e| e.responsibilities.iter())
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
    }

    /// Narrative text where achievements are normally stated: the summary,
    /// experience bullets and project descriptions.
    pub fn impact_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.has_summary() {
            parts.push(self.summary.trim());
        }
        parts.extend(self.bullets());
        parts.extend(
            self.projects
                .iter()
                .map(|p| p.description.trim())
                .filter(|d| !d.is_empty()),
        );
        parts.join("\n")
    }

    /// Every text field of the record joined into one blob, for keyword matching.
    pub fn all_text(&self) -> String {
        let p = &self.personal_info;
        let mut parts: Vec<&str> = vec![
            p.name.as_str(),
            p.email.as_str(),
            p.phone.as_str(),
            p.linkedin.as_str(),
            p.github.as_str(),
            p.portfolio.as_str(),
            self.summary.as_str(),
        ];
        for edu in &self.education {
            parts.extend([
                edu.degree.as_str(),
                edu.institution.as_str(),
                edu.graduation_date.as_str(),
                edu.gpa.as_str(),
            ]);
        }
        for exp in &self.experience {
            parts.extend([exp.title.as_str(), exp.company.as_str()]);
            parts.extend(exp.responsibilities.iter().map(String::as_str));
        }
        parts.extend(self.skills.iter().map(String::as_str));
        for proj in &self.projects {
            parts.extend([
                proj.name.as_str(),
                proj.description.as_str(),
                proj.technologies.as_str(),
            ]);
        }
        parts
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Required fields of the manual entry form that are still empty.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let p = &self.personal_info;
        [
            ("name", &p.name),
            ("email", &p.email),
            ("phone", &p.phone),
            ("summary", &self.summary),
        ]
        .into_iter()
        .filter(|(_, value)| !is_filled(value))
        .map(|(field, _)| field)
        .collect()
    }
}

fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}
