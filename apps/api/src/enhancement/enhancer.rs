//! Resume enhancement: rewrites sections of a record through the LLM.
//!
//! Every section is rewritten by its own call. A failed call never fails the
//! whole enhancement: the section keeps its original text and a warning is
//! logged, so the caller always gets a complete record back.

use std::collections::BTreeSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::enhancement::prompts::{
    CHAT_PROMPT_TEMPLATE, CONSULTANT_SYSTEM, EXPERIENCE_PROMPT_TEMPLATE, PROJECT_PROMPT_TEMPLATE,
    REVIEWER_SYSTEM, SKILLS_PROMPT_TEMPLATE, SUGGESTIONS_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{FACTUALITY_INSTRUCTION, JSON_ONLY_SYSTEM, PLAIN_TEXT_SYSTEM};
use crate::llm_client::{parse_json_reply, LlmError, TextGenerator};
use crate::models::{ExperienceEntry, ProjectEntry, ResumeRecord, Skills};

/// Leading bullet glyph or list numbering on a generated line.
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[•\-*▪●◦‣–·]+|\d{1,2}[.)])\s*").expect("list marker pattern is a valid regex")
});

#[derive(Debug, Deserialize)]
struct SkillGroups {
    #[serde(default)]
    technical: Vec<String>,
    #[serde(default)]
    soft: Vec<String>,
}

#[derive(Clone)]
pub struct Enhancer {
    generator: Arc<dyn TextGenerator>,
}

impl Enhancer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Returns an enhanced copy of `record`; the input is never modified.
    pub async fn enhance_resume(&self, record: &ResumeRecord) -> ResumeRecord {
        let mut enhanced = record.clone();

        if record.has_summary() {
            enhanced.summary = self.enhance_summary(&record.summary).await;
        }

        let mut experience = Vec::with_capacity(record.experience.len());
        for entry in &record.experience {
            experience.push(self.enhance_experience(entry).await);
        }
        enhanced.experience = experience;

        let mut projects = Vec::with_capacity(record.projects.len());
        for project in &record.projects {
            projects.push(self.enhance_project(project).await);
        }
        enhanced.projects = projects;

        if !record.skills.has_soft() && record.skills.has_technical() {
            enhanced.skills = self.categorise_skills(&record.skills).await;
        }

        info!(
            "Enhanced resume: {} experience entries, {} projects",
            enhanced.experience.len(),
            enhanced.projects.len()
        );
        enhanced
    }

    async fn enhance_summary(&self, summary: &str) -> String {
        let prompt = with_factuality(SUMMARY_PROMPT_TEMPLATE.replace("{summary}", summary));
        match self.generator.generate(&prompt, PLAIN_TEXT_SYSTEM).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Summary enhancement failed, keeping original: {e}");
                summary.to_string()
            }
        }
    }

    async fn enhance_experience(&self, entry: &ExperienceEntry) -> ExperienceEntry {
        if entry.responsibilities.iter().all(|r| r.trim().is_empty()) {
            return entry.clone();
        }

        let bullets = entry
            .responsibilities
            .iter()
            .map(|r| format!("• {r}"))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = with_factuality(
            EXPERIENCE_PROMPT_TEMPLATE
                .replace("{title}", or_na(&entry.title))
                .replace("{company}", or_na(&entry.company))
                .replace("{responsibilities}", &bullets),
        );

        let reply = match self.generator.generate(&prompt, PLAIN_TEXT_SYSTEM).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Experience enhancement failed for '{}', keeping original: {e}", entry.title);
                return entry.clone();
            }
        };

        let responsibilities = split_list_lines(&reply);
        if responsibilities.is_empty() {
            warn!("Experience enhancement for '{}' returned no bullets", entry.title);
            return entry.clone();
        }
        ExperienceEntry {
            responsibilities,
            ..entry.clone()
        }
    }

    async fn enhance_project(&self, project: &ProjectEntry) -> ProjectEntry {
        if project.description.trim().is_empty() {
            return project.clone();
        }

        let prompt = with_factuality(
            PROJECT_PROMPT_TEMPLATE
                .replace("{name}", or_na(&project.name))
                .replace("{technologies}", or_na(&project.technologies))
                .replace("{description}", &project.description),
        );

        match self.generator.generate(&prompt, PLAIN_TEXT_SYSTEM).await {
            Ok(text) => ProjectEntry {
                description: text.trim().to_string(),
                ..project.clone()
            },
            Err(e) => {
                warn!("Project enhancement failed for '{}', keeping original: {e}", project.name);
                project.clone()
            }
        }
    }

    /// Splits an uncategorised skill list into technical and soft.
    /// The model may only move skills between the two sets; anything it drops
    /// or invents is ignored and unplaced skills stay technical.
    async fn categorise_skills(&self, skills: &Skills) -> Skills {
        let listed = skills.technical.iter().cloned().collect::<Vec<_>>().join(", ");
        let prompt = SKILLS_PROMPT_TEMPLATE.replace("{skills}", &listed);

        let groups = match self.generator.generate(&prompt, JSON_ONLY_SYSTEM).await {
            Ok(reply) => parse_json_reply::<SkillGroups>(&reply),
            Err(e) => Err(e),
        };
        let groups = match groups {
            Ok(groups) => groups,
            Err(e) => {
                warn!("Skill categorisation failed, keeping original: {e}");
                return skills.clone();
            }
        };

        let soft: BTreeSet<String> = skills
            .technical
            .iter()
            .filter(|skill| groups.soft.iter().any(|s| s.trim().eq_ignore_ascii_case(skill)))
            .filter(|skill| !groups.technical.iter().any(|t| t.trim().eq_ignore_ascii_case(skill)))
            .cloned()
            .collect();
        let technical = skills.technical.difference(&soft).cloned().collect();

        Skills { technical, soft }
    }

    /// Asks for five improvement suggestions, returned one per line.
    pub async fn improvement_suggestions(
        &self,
        record: &ResumeRecord,
    ) -> Result<Vec<String>, LlmError> {
        let prompt =
            SUGGESTIONS_PROMPT_TEMPLATE.replace("{resume}", &format_resume_for_analysis(record));
        let reply = self.generator.generate(&prompt, REVIEWER_SYSTEM).await?;

        let suggestions: Vec<String> = reply
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if suggestions.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(suggestions)
    }

    /// Free-form advice about `record` in answer to `question`.
    pub async fn chat_feedback(
        &self,
        question: &str,
        record: &ResumeRecord,
    ) -> Result<String, LlmError> {
        let prompt = CHAT_PROMPT_TEMPLATE
            .replace("{resume}", &format_resume_for_analysis(record))
            .replace("{question}", question);
        let reply = self.generator.generate(&prompt, CONSULTANT_SYSTEM).await?;
        Ok(reply.trim().to_string())
    }
}

fn with_factuality(prompt: String) -> String {
    format!("{prompt}\n\n{FACTUALITY_INSTRUCTION}")
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// One entry per non-empty line, list markers removed.
fn split_list_lines(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(|line| LIST_MARKER.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Plain-text rendering of a record used as model context.
pub fn format_resume_for_analysis(record: &ResumeRecord) -> String {
    let mut parts = Vec::new();
    let info = &record.personal_info;

    parts.push(format!("Name: {}", or_na(&info.name)));
    parts.push(format!("Email: {}", or_na(&info.email)));
    parts.push(format!("Phone: {}", or_na(&info.phone)));

    if record.has_summary() {
        parts.push(format!("\nProfessional Summary:\n{}", record.summary.trim()));
    }

    if record.has_education() {
        parts.push("\nEducation:".to_string());
        for edu in record.education.iter().filter(|e| !e.is_blank()) {
            parts.push(format!("- {} from {}", edu.degree, edu.institution));
        }
    }

    if record.has_experience() {
        parts.push("\nWork Experience:".to_string());
        for exp in record.experience.iter().filter(|e| !e.is_blank()) {
            parts.push(format!("\n{} at {}", exp.title, exp.company));
            parts.extend(exp.responsibilities.iter().map(|r| format!("• {r}")));
        }
    }

    if record.has_skills() {
        parts.push("\nSkills:".to_string());
        if !record.skills.technical.is_empty() {
            let list: Vec<&str> = record.skills.technical.iter().map(String::as_str).collect();
            parts.push(format!("Technical: {}", list.join(", ")));
        }
        if !record.skills.soft.is_empty() {
            let list: Vec<&str> = record.skills.soft.iter().map(String::as_str).collect();
            parts.push(format!("Soft: {}", list.join(", ")));
        }
    }

    if record.has_projects() {
        parts.push("\nProjects:".to_string());
        for project in record.projects.iter().filter(|p| !p.is_blank()) {
            parts.push(format!("\n{}: {}", project.name, project.description));
        }
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::models::{EducationEntry, PersonalInfo};

    /// Answers by prompt kind; counts calls.
    struct ScriptedGenerator {
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = if prompt.contains("professional summary") {
                "  Rewritten summary.  "
            } else if prompt.contains("job responsibilities") {
                "• Led a team of 5 engineers\n\n- Shipped billing v2\n3. Cut costs by 20%"
            } else if prompt.contains("project description") {
                "Rewritten project."
            } else if prompt.contains("Organize the following skills") {
                "```json\n{\"technical\": [\"Python\", \"Kubernetes\"], \"soft\": [\"Leadership\"]}\n```"
            } else if prompt.contains("suggestions") {
                "1. Add metrics\n\n2. Add a GitHub link\n"
            } else {
                "Focus on impact."
            };
            Ok(reply.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 400,
                message: "API key not valid".to_string(),
            })
        }
    }

    fn sample_record() -> ResumeRecord {
        ResumeRecord {
            personal_info: PersonalInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            summary: "Backend engineer.".to_string(),
            education: vec![EducationEntry {
                degree: "B.S. Computer Science".to_string(),
                institution: "State University".to_string(),
                ..Default::default()
            }],
            experience: vec![
                ExperienceEntry {
                    title: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    responsibilities: vec!["did backend work".to_string()],
                    ..Default::default()
                },
                ExperienceEntry {
                    title: "Intern".to_string(),
                    company: "Initech".to_string(),
                    ..Default::default()
                },
            ],
            projects: vec![ProjectEntry {
                name: "Ledger".to_string(),
                description: "A budgeting app.".to_string(),
                technologies: "React".to_string(),
            }],
            skills: Skills {
                technical: ["Python", "Leadership"].iter().map(|s| s.to_string()).collect(),
                soft: BTreeSet::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_enhance_rewrites_each_section() {
        let generator = ScriptedGenerator::new();
        let enhancer = Enhancer::new(generator.clone());
        let original = sample_record();

        let enhanced = enhancer.enhance_resume(&original).await;

        assert_eq!(enhanced.summary, "Rewritten summary.");
        assert_eq!(
            enhanced.experience[0].responsibilities,
            vec![
                "Led a team of 5 engineers".to_string(),
                "Shipped billing v2".to_string(),
                "Cut costs by 20%".to_string(),
            ]
        );
        assert_eq!(enhanced.experience[0].title, "Engineer");
        assert_eq!(enhanced.projects[0].description, "Rewritten project.");
        // Entry without responsibilities is not sent to the model.
        assert_eq!(enhanced.experience[1], original.experience[1]);
        // summary + one experience + one project + skills
        assert_eq!(generator.calls.load(Ordering::SeqCst), 4);
        // Input is untouched.
        assert_eq!(original, sample_record());
    }

    #[tokio::test]
    async fn test_skills_are_split_without_inventing_new_ones() {
        let enhancer = Enhancer::new(ScriptedGenerator::new());
        let enhanced = enhancer.enhance_resume(&sample_record()).await;

        let technical: Vec<&str> = enhanced.skills.technical.iter().map(String::as_str).collect();
        let soft: Vec<&str> = enhanced.skills.soft.iter().map(String::as_str).collect();
        assert_eq!(technical, vec!["Python"]);
        assert_eq!(soft, vec!["Leadership"]);
    }

    #[tokio::test]
    async fn test_skills_already_categorised_are_left_alone() {
        let generator = ScriptedGenerator::new();
        let enhancer = Enhancer::new(generator.clone());
        let mut record = ResumeRecord::default();
        record.skills.technical.insert("Python".to_string());
        record.skills.soft.insert("Teamwork".to_string());

        let enhanced = enhancer.enhance_resume(&record).await;

        assert_eq!(enhanced.skills, record.skills);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failing_generator_keeps_original_text() {
        let enhancer = Enhancer::new(Arc::new(FailingGenerator));
        let original = sample_record();

        let enhanced = enhancer.enhance_resume(&original).await;

        assert_eq!(enhanced, original);
    }

    #[tokio::test]
    async fn test_suggestions_are_split_per_line() {
        let enhancer = Enhancer::new(ScriptedGenerator::new());
        let suggestions = enhancer.improvement_suggestions(&sample_record()).await.unwrap();
        assert_eq!(suggestions, vec!["1. Add metrics", "2. Add a GitHub link"]);
    }

    #[tokio::test]
    async fn test_chat_and_suggestions_propagate_failures() {
        let enhancer = Enhancer::new(Arc::new(FailingGenerator));
        assert!(enhancer.improvement_suggestions(&sample_record()).await.is_err());
        assert!(enhancer.chat_feedback("How is it?", &sample_record()).await.is_err());
    }

    #[test]
    fn test_format_resume_for_analysis() {
        let text = format_resume_for_analysis(&sample_record());
        assert!(text.starts_with("Name: Jane Doe\nEmail: jane@example.com\nPhone: N/A"));
        assert!(text.contains("- B.S. Computer Science from State University"));
        assert!(text.contains("Engineer at Acme\n• did backend work"));
        assert!(text.contains("Technical: Leadership, Python"));
        assert!(text.contains("Ledger: A budgeting app."));
        assert!(!text.contains("Soft:"));
    }

    #[test]
    fn test_split_list_lines_strips_markers() {
        assert_eq!(
            split_list_lines("• one\n  - two\n\n10) three\n* four"),
            vec!["one", "two", "three", "four"]
        );
    }
}
