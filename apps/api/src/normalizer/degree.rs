//! Degree level inference from free-text degree names.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::profile::DegreeLevel;

/// Ordered (pattern, level) cascade. Priority runs PHD > MASTER > BACHELOR
/// > DIPLOMA and the first match wins, so text mentioning several degrees
/// resolves to the highest-priority family.
static DEGREE_CASCADE: Lazy<Vec<(Regex, DegreeLevel)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)\bph\.?\s?d\b|\bdoctorate\b|\bdoctoral\b").unwrap(),
            DegreeLevel::Phd,
        ),
        (
            Regex::new(r"(?i)\bmaster(?:'?s)?\b|\bm\.?\s?sc\b|\bmba\b").unwrap(),
            DegreeLevel::Master,
        ),
        (
            Regex::new(r"(?i)\bbachelor(?:'?s)?\b|\bb\.?\s?sc\b|\bbs\b|\bba\b").unwrap(),
            DegreeLevel::Bachelor,
        ),
        (
            Regex::new(r"(?i)\bdiploma\b|\bassociate\b|\bfoundation\b").unwrap(),
            DegreeLevel::Diploma,
        ),
    ]
});

/// Infers the degree level from free text. Returns `None` when no family
/// matches.
pub fn infer_degree_level(text: &str) -> Option<DegreeLevel> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DEGREE_CASCADE
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, level)| *level)
}

/// Every degree family matching the text, in cascade order. Used by the
/// heuristic JD extractor to fill the preferred-degree bucket.
pub fn matching_degree_levels(text: &str) -> Vec<DegreeLevel> {
    DEGREE_CASCADE
        .iter()
        .filter(|(re, _)| re.is_match(text))
        .map(|(_, level)| *level)
        .collect()
}
