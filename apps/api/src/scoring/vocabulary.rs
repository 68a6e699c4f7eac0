//! Fixed ATS vocabulary. Terms are matched case-insensitively on word boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

pub const TECHNICAL_TERMS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "node",
    "sql",
    "nosql",
    "mongodb",
    "postgresql",
    "mysql",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "git",
    "ci/cd",
    "agile",
    "scrum",
    "devops",
    "machine learning",
    "ai",
    "data science",
    "analytics",
    "api",
    "rest",
    "microservices",
    "cloud",
    "linux",
    "windows",
    "ios",
    "android",
];

pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "improved",
    "developed",
    "created",
    "designed",
    "built",
    "implemented",
    "managed",
    "led",
    "increased",
    "decreased",
    "reduced",
    "optimized",
    "enhanced",
    "streamlined",
    "automated",
    "delivered",
    "launched",
    "established",
    "collaborated",
    "coordinated",
    "facilitated",
    "architected",
    "spearheaded",
    "mentored",
    "migrated",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem-solving",
    "analytical",
    "creative",
    "adaptable",
    "detail-oriented",
    "time management",
    "critical thinking",
    "collaboration",
];

/// One vocabulary list compiled to word-boundary regexes.
pub struct TermList {
    terms: Vec<(&'static str, Regex)>,
}

impl TermList {
    pub fn new(words: &[&'static str]) -> Self {
        let terms = words
            .iter()
            .map(|&w| {
                let pattern = format!(r"(?i)(?:^|[^\w/+-]){}(?:$|[^\w/+-])", regex::escape(w));
                (w, Regex::new(&pattern).expect("escaped vocabulary term is a valid regex"))
            })
            .collect();
        Self { terms }
    }

    /// Distinct terms of this list that occur in `text`, in list order.
    pub fn matches(&self, text: &str) -> Vec<&'static str> {
        self.terms
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(w, _)| *w)
            .collect()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.terms.iter().any(|(w, _)| w.eq_ignore_ascii_case(word))
    }
}

pub static TECHNICAL: Lazy<TermList> = Lazy::new(|| TermList::new(TECHNICAL_TERMS));
pub static ACTION: Lazy<TermList> = Lazy::new(|| TermList::new(ACTION_VERBS));
pub static SOFT: Lazy<TermList> = Lazy::new(|| TermList::new(SOFT_SKILLS));

/// Numeric evidence: plain counts, percentages, currency, `10+`, `3x`, `5k`.
pub static METRIC_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$€£]?\d+(?:[.,]\d+)*(?:%|\+|[xX]\b|[kKmMbB]\b)?")
        .expect("metric pattern is a valid regex")
});

/// True when the bullet's first word is a recognised action verb.
pub fn starts_with_action_verb(bullet: &str) -> bool {
    bullet
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|w| ACTION.contains_word(w))
}
