//! Deterministic heuristic JD extraction, used when the generation service
//! is unavailable or returns unusable output.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexical::tokenize;
use crate::models::job::{JobRequirementProfile, SourceMode};
use crate::normalizer::degree::{infer_degree_level, matching_degree_levels};
use crate::normalizer::field::normalize_field_of_study;

const KEYWORD_POOL_SIZE: usize = 12;
const MUST_HAVE_COUNT: usize = 6;
const NICE_TO_HAVE_COUNT: usize = 4;
const ROLE_KEYWORD_COUNT: usize = 8;

static REQUIRED_SIGNAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\brequired\b|\bmust have\b|\bmandatory\b|\bminimum\b").unwrap()
});

static PREFERRED_SIGNAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bpreferred\b|\bnice to have\b|\bplus\b|\bdesired\b").unwrap()
});

static YEARS_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*(?:-|–|to)\s*(\d{1,2})\+?\s*years?\b|\b(\d{1,2})\s*\+?\s*years?\b")
        .unwrap()
});

/// Field-of-study phrases scanned for in JD text. Matching is substring on
/// the lowercased text; each hit goes through the normalizer.
const FIELD_PHRASES: &[&str] = &[
    "computer science",
    "comp sci",
    "software engineering",
    "information technology",
    "information systems",
    "data science",
    "artificial intelligence",
    "machine learning",
    "electrical engineering",
    "mechanical engineering",
    "civil engineering",
    "mathematics",
    "statistics",
    "physics",
    "business administration",
    "accounting",
    "finance",
    "economics",
    "marketing",
    "human resources",
];

/// Builds a heuristic requirement profile from raw JD text.
///
/// Keyword pool: the 12 most frequent unique tokens (ties by first
/// occurrence), split into must-have (first 6), nice-to-have (next 4),
/// and role keywords (first 8).
pub fn heuristic_profile(jd_text: &str, title: &str) -> JobRequirementProfile {
    let mut profile = JobRequirementProfile::empty(SourceMode::Heuristic);

    let pool = keyword_pool(jd_text);
    profile.must_have_skills = pool.iter().take(MUST_HAVE_COUNT).cloned().collect();
    profile.nice_to_have_skills = pool
        .iter()
        .skip(MUST_HAVE_COUNT)
        .take(NICE_TO_HAVE_COUNT)
        .cloned()
        .collect();
    profile.role_keywords = pool.iter().take(ROLE_KEYWORD_COUNT).cloned().collect();

    let (min, max) = extract_years_range(jd_text);
    profile.years_exp_min = min;
    profile.years_exp_max = max;

    apply_education_signals(&mut profile, jd_text);

    let summary = format!("{} (heuristic extraction)", title.trim());
    profile.summary = Some(summary);

    profile
}

/// Unique tokens ranked by descending frequency, ties broken by first
/// occurrence. Deterministic for identical input.
fn keyword_pool(jd_text: &str) -> Vec<String> {
    let tokens = tokenize(jd_text);
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, token) in tokens.iter().enumerate() {
        let entry = counts.entry(token.as_str()).or_insert((0, index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(token, (count, first))| (token, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(KEYWORD_POOL_SIZE)
        .map(|(token, _, _)| token.to_string())
        .collect()
}

/// Education-signal extraction: degree keywords and known field phrases are
/// bucketed into required vs preferred depending on which signal phrase
/// class co-occurs in the text. A required signal wins when both are
/// present; with neither signal everything defaults to preferred.
fn apply_education_signals(profile: &mut JobRequirementProfile, jd_text: &str) {
    let lowered = jd_text.to_lowercase();

    let degree = infer_degree_level(jd_text);
    let all_degrees = matching_degree_levels(jd_text);
    let fields: Vec<String> = FIELD_PHRASES
        .iter()
        .filter(|phrase| lowered.contains(**phrase))
        .filter_map(|phrase| normalize_field_of_study(phrase))
        .collect();

    let has_required_signal = REQUIRED_SIGNAL_RE.is_match(jd_text);

    if has_required_signal {
        profile.required_degree_level = degree;
        profile.required_fields_of_study = fields;
    } else {
        // preferred signal present, or no signal at all
        profile.preferred_degree_levels = all_degrees;
        profile.preferred_fields_of_study = fields;
    }
}

fn extract_years_range(jd_text: &str) -> (Option<i32>, Option<i32>) {
    let Some(caps) = YEARS_RANGE_RE.captures(jd_text) else {
        return (None, None);
    };
    if let (Some(min), Some(max)) = (caps.get(1), caps.get(2)) {
        let min = min.as_str().parse::<i32>().ok();
        let max = max.as_str().parse::<i32>().ok();
        (min, max)
    } else {
        (caps.get(3).and_then(|m| m.as_str().parse::<i32>().ok()), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::DegreeLevel;

    const SAMPLE_JD: &str = "Bachelor's degree required in Computer Science. \
        3-5 years experience with Python and SQL.";

    #[test]
    fn test_required_degree_and_field_extracted() {
        let profile = heuristic_profile(SAMPLE_JD, "Backend Engineer");
        assert_eq!(profile.required_degree_level, Some(DegreeLevel::Bachelor));
        assert!(profile
            .required_fields_of_study
            .contains(&"computer_science".to_string()));
        assert!(profile.preferred_degree_levels.is_empty());
        assert_eq!(profile.source_mode, SourceMode::Heuristic);
    }

    #[test]
    fn test_must_have_skills_subset_of_tokens() {
        let profile = heuristic_profile(SAMPLE_JD, "Backend Engineer");
        let tokens = tokenize(SAMPLE_JD);
        assert!(profile.must_have_skills.len() <= 6);
        assert!(!profile.must_have_skills.is_empty());
        for skill in &profile.must_have_skills {
            assert!(tokens.contains(skill), "{skill} not in tokenized JD");
        }
    }

    #[test]
    fn test_keyword_split_counts() {
        let jd = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi";
        let profile = heuristic_profile(jd, "Greek Engineer");
        assert_eq!(profile.must_have_skills.len(), 6);
        assert_eq!(profile.nice_to_have_skills.len(), 4);
        assert_eq!(profile.role_keywords.len(), 8);
        // role keywords are the first 8 of the same pool
        assert_eq!(profile.role_keywords[..6], profile.must_have_skills[..]);
    }

    #[test]
    fn test_frequency_ranking_with_first_seen_tiebreak() {
        let pool = keyword_pool("kotlin kotlin gradle android gradle kotlin compose");
        assert_eq!(pool[0], "kotlin");
        assert_eq!(pool[1], "gradle");
        assert_eq!(pool[2], "android");
        assert_eq!(pool[3], "compose");
    }

    #[test]
    fn test_preferred_bucket_when_no_required_signal() {
        let jd = "Master's degree in Data Science preferred. Python a plus.";
        let profile = heuristic_profile(jd, "Data Scientist");
        assert_eq!(profile.required_degree_level, None);
        assert_eq!(profile.preferred_degree_levels, vec![DegreeLevel::Master]);
        assert!(profile
            .preferred_fields_of_study
            .contains(&"data_science".to_string()));
    }

    #[test]
    fn test_required_signal_wins_over_preferred() {
        let jd = "Bachelor's degree required, Master's preferred, in Computer Science.";
        let profile = heuristic_profile(jd, "Engineer");
        // first-match-wins cascade resolves MASTER for the required level
        assert_eq!(profile.required_degree_level, Some(DegreeLevel::Master));
        assert!(profile.preferred_degree_levels.is_empty());
    }

    #[test]
    fn test_no_signal_defaults_everything_to_preferred() {
        let jd = "Bachelor of Science in Physics. Python, SQL, statistics.";
        let profile = heuristic_profile(jd, "Analyst");
        assert_eq!(profile.required_degree_level, None);
        assert_eq!(profile.preferred_degree_levels, vec![DegreeLevel::Bachelor]);
        assert!(profile
            .preferred_fields_of_study
            .contains(&"physics".to_string()));
    }

    #[test]
    fn test_years_range() {
        assert_eq!(extract_years_range("3-5 years experience"), (Some(3), Some(5)));
        assert_eq!(extract_years_range("7+ years"), (Some(7), None));
        assert_eq!(extract_years_range("no mention"), (None, None));
    }
}
