use crate::scoring::ats::{Section, SubScores};

/// Builds the textual suggestions attached to a `ScoreReport`.
/// Thresholds are per sub-score; the order of messages is fixed.
pub fn build_suggestions(scores: &SubScores, missing: &[Section]) -> Vec<String> {
    let mut suggestions = Vec::new();

    if scores.format_structure < 70.0 {
        suggestions
            .push("Add more contact information (email, phone, LinkedIn or GitHub)".to_string());
    }

    if scores.keyword_optimization < 70.0 {
        suggestions.push(
            "Add more relevant technical keywords and action verbs to improve ATS visibility"
                .to_string(),
        );
        suggestions.push(
            "Use strong action verbs like 'achieved', 'implemented', 'led', 'optimized'"
                .to_string(),
        );
    }

    if scores.content_quality < 70.0 {
        suggestions.push(
            "Expand your experience descriptions with more detail and start each bullet with an action verb"
                .to_string(),
        );
        suggestions.push("Write a professional summary of 30-100 words".to_string());
    }

    if scores.completeness < 80.0 && !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|s| s.label()).collect();
        suggestions.push(format!("Add the missing sections: {}", labels.join(", ")));
    }

    if scores.quantifiable_results < 60.0 {
        suggestions.push(
            "Add quantifiable achievements (e.g. 'Increased efficiency by 30%', 'Managed team of 5')"
                .to_string(),
        );
        suggestions
            .push("Use numbers, percentages and metrics to demonstrate impact".to_string());
    }

    if scores.all().iter().all(|s| *s >= 70.0) {
        suggestions.push("Your resume is well-structured and ATS-friendly".to_string());
    }

    if scores.quantifiable_results >= 80.0 {
        suggestions.push("Excellent use of quantifiable achievements".to_string());
    }

    if suggestions.is_empty() {
        suggestions.push("Your resume looks great".to_string());
    }

    suggestions
}
