//! ATS Scorer: a fixed weighted checklist over a `ResumeRecord`.
//!
//! Five sub-scores, each a bounded linear function of simple counts:
//!
//! | sub-score             | weight |
//! |-----------------------|--------|
//! | format / structure    | 20%    |
//! | keyword optimization  | 25%    |
//! | content quality       | 20%    |
//! | completeness          | 20%    |
//! | quantifiable results  | 15%    |
//!
//! Pure and deterministic: no I/O, no clock, no randomness.

use serde::{Deserialize, Serialize};

use crate::models::ResumeRecord;
use crate::scoring::feedback::build_suggestions;
use crate::scoring::vocabulary::{starts_with_action_verb, ACTION, METRIC_TOKEN, SOFT, TECHNICAL};

const TECHNICAL_CEILING: f64 = 10.0;
const ACTION_CEILING: f64 = 8.0;
const SOFT_CEILING: f64 = 5.0;
const METRIC_CEILING: f64 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub format_structure: f64,
    pub keyword_optimization: f64,
    pub content_quality: f64,
    pub completeness: f64,
    pub quantifiable_results: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            format_structure: 0.20,
            keyword_optimization: 0.25,
            content_quality: 0.20,
            completeness: 0.20,
            quantifiable_results: 0.15,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.format_structure
            + self.keyword_optimization
            + self.content_quality
            + self.completeness
            + self.quantifiable_results
    }
}

/// The five sub-scores, each in [0, 100].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub format_structure: f64,
    pub keyword_optimization: f64,
    pub content_quality: f64,
    pub completeness: f64,
    pub quantifiable_results: f64,
}

impl SubScores {
    pub fn weighted_total(&self, weights: &ScoreWeights) -> f64 {
        debug_assert!((weights.sum() - 1.0).abs() < 1e-9, "score weights must sum to 1");
        (self.format_structure * weights.format_structure
            + self.keyword_optimization * weights.keyword_optimization
            + self.content_quality * weights.content_quality
            + self.completeness * weights.completeness
            + self.quantifiable_results * weights.quantifiable_results)
            .clamp(0.0, 100.0)
    }

    pub fn all(&self) -> [f64; 5] {
        [
            self.format_structure,
            self.keyword_optimization,
            self.content_quality,
            self.completeness,
            self.quantifiable_results,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_total(total: u32) -> Self {
        match total {
            t if t >= 80 => ScoreBand::Excellent,
            t if t >= 60 => ScoreBand::Good,
            _ => ScoreBand::NeedsImprovement,
        }
    }
}

/// Resume sections the scorer checks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PersonalInfo,
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::PersonalInfo => "Contact Information",
            Section::Summary => "Professional Summary",
            Section::Education => "Education",
            Section::Experience => "Work Experience",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
        }
    }

    /// Projects are recommended; every other section is required.
    pub fn is_required(self) -> bool {
        !matches!(self, Section::Projects)
    }
}

/// Which keywords the record hit, per vocabulary list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHits {
    pub technical: Vec<String>,
    pub action_verbs: Vec<String>,
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Weighted total, 0 – 100.
    pub total: u32,
    pub band: ScoreBand,
    pub sub_scores: SubScores,
    /// True only when every required section is present.
    pub completeness_passed: bool,
    pub missing_sections: Vec<Section>,
    pub keyword_hits: KeywordHits,
    pub metrics_found: usize,
    pub suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AtsScorer {
    weights: ScoreWeights,
}

impl AtsScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, record: &ResumeRecord) -> ScoreReport {
        let all_text = record.all_text();
        let keyword_hits = KeywordHits {
            technical: to_owned(TECHNICAL.matches(&all_text)),
            action_verbs: to_owned(ACTION.matches(&all_text)),
            soft_skills: to_owned(SOFT.matches(&all_text)),
        };
        let metrics_found = count_metrics(record);
        let missing_sections = missing_sections(record);
        let completeness_passed = missing_sections.iter().all(|s| !s.is_required());

        let sub_scores = SubScores {
            format_structure: score_format_structure(record),
            keyword_optimization: score_keywords(&keyword_hits),
            content_quality: score_content_quality(record),
            completeness: score_completeness(record),
            quantifiable_results: score_quantifiable_results(metrics_found),
        };

        let total = sub_scores.weighted_total(&self.weights).round() as u32;
        let suggestions = build_suggestions(&sub_scores, &missing_sections);

        ScoreReport {
            total,
            band: ScoreBand::from_total(total),
            sub_scores,
            completeness_passed,
            missing_sections,
            keyword_hits,
            metrics_found,
            suggestions,
        }
    }
}

fn to_owned(words: Vec<&str>) -> Vec<String> {
    words.into_iter().map(String::from).collect()
}

/// Rounds to one decimal so serialized scores stay readable.
fn tidy(score: f64) -> f64 {
    (score.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

fn ratio_score(count: usize, ceiling: f64) -> f64 {
    (count as f64 / ceiling).min(1.0) * 100.0
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn score_format_structure(record: &ResumeRecord) -> f64 {
    let p = &record.personal_info;
    let mut score = 0.0;
    if record.has_name() {
        score += 20.0;
    }
    if !p.email.trim().is_empty() {
        score += 20.0;
    }
    if !p.phone.trim().is_empty() {
        score += 20.0;
    }
    if p.has_professional_link() {
        score += 20.0;
    }
    if record.has_summary() {
        score += 10.0;
    }
    if record.has_education() {
        score += 5.0;
    }
    if record.has_experience() {
        score += 5.0;
    }
    tidy(score)
}

fn score_keywords(hits: &KeywordHits) -> f64 {
    let technical = ratio_score(hits.technical.len(), TECHNICAL_CEILING);
    let action = ratio_score(hits.action_verbs.len(), ACTION_CEILING);
    let soft = ratio_score(hits.soft_skills.len(), SOFT_CEILING);
    tidy(technical * 0.5 + action * 0.3 + soft * 0.2)
}

fn score_content_quality(record: &ResumeRecord) -> f64 {
    let mut score = 0.0;

    if record.has_summary() {
        let words = word_count(&record.summary);
        score += if (30..=100).contains(&words) { 20.0 } else { 10.0 };
    }

    let bullets: Vec<&str> = record.bullets().collect();
    let bullet_words: usize = bullets.iter().map(|b| word_count(b)).sum();
    score += match bullet_words {
        w if w > 100 => 25.0,
        w if w > 50 => 15.0,
        w if w > 0 => 8.0,
        _ => 0.0,
    };

    if !bullets.is_empty() {
        let action_led = bullets.iter().filter(|b| starts_with_action_verb(b)).count();
        score += 20.0 * action_led as f64 / bullets.len() as f64;
    }

    if record.projects.iter().any(|p| !p.description.trim().is_empty()) {
        score += 20.0;
    }

    let skills = &record.skills;
    score += match (skills.has_technical(), skills.has_soft()) {
        (true, true) => 15.0,
        (false, false) => 0.0,
        _ => 8.0,
    };

    tidy(score)
}

fn score_completeness(record: &ResumeRecord) -> f64 {
    let mut score = 0.0;
    if record.has_name() {
        score += 20.0;
    }
    if record.has_summary() {
        score += 15.0;
    }
    if record.has_education() {
        score += 20.0;
    }
    if record.has_experience() {
        score += 25.0;
    }
    if record.has_skills() {
        score += 20.0;
    }
    tidy(score)
}

fn score_quantifiable_results(metrics_found: usize) -> f64 {
    tidy(ratio_score(metrics_found, METRIC_CEILING))
}

fn count_metrics(record: &ResumeRecord) -> usize {
    METRIC_TOKEN.find_iter(&record.impact_text()).count()
}

fn missing_sections(record: &ResumeRecord) -> Vec<Section> {
    [
        (Section::PersonalInfo, record.has_name()),
        (Section::Summary, record.has_summary()),
        (Section::Education, record.has_education()),
        (Section::Experience, record.has_experience()),
        (Section::Skills, record.has_skills()),
        (Section::Projects, record.has_projects()),
    ]
    .into_iter()
    .filter(|(_, present)| !present)
    .map(|(section, _)| section)
    .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, Skills};

    fn full_record() -> ResumeRecord {
        ResumeRecord {
            personal_info: PersonalInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "+1 234 567 8900".to_string(),
                linkedin: "https://linkedin.com/in/janedoe".to_string(),
                github: "https://github.com/janedoe".to_string(),
                portfolio: String::new(),
            },
            summary: "Backend engineer with 8 years building cloud services in Python and \
                      Java. Led migrations to Kubernetes and AWS, improved reliability and \
                      reduced costs by 25% through automation, communication and leadership \
                      across teams."
                .to_string(),
            education: vec![EducationEntry {
                degree: "B.S. Computer Science".to_string(),
                institution: "State University".to_string(),
                graduation_date: "2016".to_string(),
                gpa: "3.8".to_string(),
            }],
            experience: vec![ExperienceEntry {
                title: "Senior Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "Jan 2020".to_string(),
                end_date: "Present".to_string(),
                responsibilities: vec![
                    "Developed REST API serving 2M users with Docker and PostgreSQL".to_string(),
                    "Optimized SQL queries, cutting p99 latency by 40%".to_string(),
                    "Responsible for on-call rotation".to_string(),
                ],
            }],
            projects: vec![ProjectEntry {
                name: "Ledger".to_string(),
                description: "Built a React dashboard used by 300 customers".to_string(),
                technologies: "React, Node".to_string(),
            }],
            skills: Skills {
                technical: ["Python", "Git", "Linux"].map(String::from).into(),
                soft: ["Teamwork", "Problem-solving"].map(String::from).into(),
            },
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((ScoreWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_record_scores_zero_everywhere() {
        let report = AtsScorer::new().score(&ResumeRecord::default());
        assert_eq!(report.total, 0);
        assert_eq!(report.sub_scores, SubScores::default());
        assert!(!report.completeness_passed);
        assert_eq!(report.band, ScoreBand::NeedsImprovement);
        assert_eq!(report.missing_sections.len(), 6);
        for section in &report.missing_sections {
            assert!(
                report.suggestions.iter().any(|s| s.contains(section.label())),
                "suggestions do not mention {}: {:?}",
                section.label(),
                report.suggestions
            );
        }
    }

    #[test]
    fn test_full_record_total_in_range_and_strong() {
        let report = AtsScorer::new().score(&full_record());
        assert!(report.total <= 100);
        assert!(report.total >= 60, "total was {}", report.total);
        assert!(report.completeness_passed);
        assert_eq!(report.missing_sections, Vec::<Section>::new());
        for s in report.sub_scores.all() {
            assert!((0.0..=100.0).contains(&s), "sub-score {s} out of range");
        }
    }

    #[test]
    fn test_total_is_bounded_for_saturated_record() {
        let mut record = full_record();
        let everything = [
            crate::scoring::vocabulary::TECHNICAL_TERMS,
            crate::scoring::vocabulary::ACTION_VERBS,
            crate::scoring::vocabulary::SOFT_SKILLS,
        ]
        .concat()
        .join(", ");
        record.summary = format!("{everything} 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15%");
        let report = AtsScorer::new().score(&record);
        assert!(report.total <= 100);
        assert_eq!(report.sub_scores.keyword_optimization, 100.0);
        assert_eq!(report.sub_scores.quantifiable_results, 100.0);
    }

    #[test]
    fn test_adding_keyword_never_decreases_keyword_score() {
        let scorer = AtsScorer::new();
        let mut record = ResumeRecord::default();
        let mut previous = scorer.score(&record).sub_scores.keyword_optimization;
        for term in ["python", "led", "teamwork", "docker", "optimized", "communication"] {
            record.skills.technical.insert(term.to_string());
            let current = scorer.score(&record).sub_scores.keyword_optimization;
            assert!(current >= previous, "{term}: {current} < {previous}");
            assert!(current > previous, "{term} should have raised the score");
            previous = current;
        }

        // Past the ceiling the score saturates but does not drop.
        let mut saturated = full_record();
        for term in crate::scoring::vocabulary::TECHNICAL_TERMS {
            let before = scorer.score(&saturated).sub_scores.keyword_optimization;
            saturated.summary.push_str(&format!(" {term}"));
            let after = scorer.score(&saturated).sub_scores.keyword_optimization;
            assert!(after >= before);
        }
    }

    #[test]
    fn test_missing_education_fails_completeness_check() {
        let mut record = full_record();
        record.education.clear();
        let report = AtsScorer::new().score(&record);
        assert!(!report.completeness_passed);
        assert!(report.missing_sections.contains(&Section::Education));
        assert!(report.sub_scores.completeness < 100.0);

        // A blank placeholder entry is still missing.
        record.education.push(EducationEntry::default());
        assert!(!AtsScorer::new().score(&record).completeness_passed);
    }

    #[test]
    fn test_missing_projects_does_not_fail_completeness_check() {
        let mut record = full_record();
        record.projects.clear();
        let report = AtsScorer::new().score(&record);
        assert!(report.completeness_passed);
        assert_eq!(report.missing_sections, vec![Section::Projects]);
    }

    #[test]
    fn test_quantified_summary_scores_nonzero() {
        let record = ResumeRecord {
            summary: "Led team of 5 engineers, increased throughput by 30%".to_string(),
            ..Default::default()
        };
        let report = AtsScorer::new().score(&record);
        assert_eq!(report.metrics_found, 2);
        assert!(report.sub_scores.quantifiable_results > 0.0);
        assert_eq!(report.sub_scores.quantifiable_results, 20.0);
    }

    #[test]
    fn test_contact_numbers_are_not_metrics() {
        let record = ResumeRecord {
            personal_info: PersonalInfo {
                phone: "+1 234 567 8900".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(AtsScorer::new().score(&record).metrics_found, 0);
    }

    #[test]
    fn test_blank_skill_scores_like_empty_record() {
        let mut record = ResumeRecord::default();
        record.skills.technical.insert("   ".to_string());
        let report = AtsScorer::new().score(&record);
        assert_eq!(report.total, 0);
        assert_eq!(report.sub_scores.completeness, 0.0);
        assert_eq!(report.sub_scores.content_quality, 0.0);
        assert!(report.missing_sections.contains(&Section::Skills));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let scorer = AtsScorer::new();
        let record = full_record();
        assert_eq!(scorer.score(&record), scorer.score(&record));
        assert_eq!(AtsScorer::new().score(&record), scorer.score(&record));
    }

    #[test]
    fn test_action_verb_ratio_feeds_content_quality() {
        let mut weak = full_record();
        for exp in &mut weak.experience {
            for bullet in &mut exp.responsibilities {
                *bullet = format!("Responsible for {bullet}");
            }
        }
        let strong = full_record();
        let scorer = AtsScorer::new();
        assert!(
            scorer.score(&strong).sub_scores.content_quality
                > scorer.score(&weak).sub_scores.content_quality
        );
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ScoreBand::from_total(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_total(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_total(60), ScoreBand::Good);
        assert_eq!(ScoreBand::from_total(59), ScoreBand::NeedsImprovement);
    }
}
