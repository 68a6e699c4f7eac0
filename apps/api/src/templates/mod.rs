// Template filling: three LaTeX skeletons shipped inside the binary, merged
// with a ResumeRecord by placeholder substitution.

pub mod latex;

use serde::{Deserialize, Serialize};

use crate::models::ResumeRecord;

const PROFESSIONAL_SKELETON: &str = include_str!("../../templates/professional.tex");
const MODERN_SKELETON: &str = include_str!("../../templates/modern.tex");
const CLASSIC_SKELETON: &str = include_str!("../../templates/classic.tex");

/// The placeholders every skeleton carries, in fill order.
pub const PLACEHOLDERS: [&str; 7] = [
    "{{NAME}}",
    "{{CONTACT}}",
    "{{SUMMARY}}",
    "{{EDUCATION}}",
    "{{EXPERIENCE}}",
    "{{SKILLS}}",
    "{{PROJECTS}}",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateChoice {
    #[default]
    #[serde(alias = "template1")]
    Professional,
    #[serde(alias = "template2")]
    Modern,
    #[serde(alias = "template3")]
    Classic,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateChoice,
    pub display_name: &'static str,
    pub description: &'static str,
}

impl TemplateChoice {
    pub const ALL: [TemplateChoice; 3] = [
        TemplateChoice::Professional,
        TemplateChoice::Modern,
        TemplateChoice::Classic,
    ];

    pub fn info(self) -> TemplateInfo {
        let (display_name, description) = match self {
            TemplateChoice::Professional => ("Professional", "Clean single-column layout with ruled sections"),
            TemplateChoice::Modern => ("Modern", "Sans-serif layout with blue accents"),
            TemplateChoice::Classic => ("Classic", "Traditional serif layout with centred headings"),
        };
        TemplateInfo {
            id: self,
            display_name,
            description,
        }
    }

    /// Short id used in file names (`professional`, `modern`, `classic`).
    pub fn id(self) -> &'static str {
        match self {
            TemplateChoice::Professional => "professional",
            TemplateChoice::Modern => "modern",
            TemplateChoice::Classic => "classic",
        }
    }

    fn skeleton(self) -> &'static str {
        match self {
            TemplateChoice::Professional => PROFESSIONAL_SKELETON,
            TemplateChoice::Modern => MODERN_SKELETON,
            TemplateChoice::Classic => CLASSIC_SKELETON,
        }
    }
}

/// Fills the chosen skeleton with LaTeX built from `record`.
/// All record text is escaped, so user input can never re-introduce a
/// placeholder or inject LaTeX commands.
pub fn fill_template(record: &ResumeRecord, choice: TemplateChoice) -> String {
    let fragments = [
        latex::escape(record.personal_info.name.trim()),
        latex::contact_line(&record.personal_info),
        latex::summary_section(&record.summary),
        latex::education_section(&record.education),
        latex::experience_section(&record.experience),
        latex::skills_section(&record.skills),
        latex::projects_section(&record.projects),
    ];

    PLACEHOLDERS
        .iter()
        .zip(fragments.iter())
        .fold(choice.skeleton().to_string(), |doc, (placeholder, fragment)| {
            doc.replace(placeholder, fragment)
        })
}
