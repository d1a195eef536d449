//! Candidate scoring.
//!
//! Two deliberately separate algorithms serve two call sites:
//! `score_candidate` ranks a candidate against a full
//! `JobRequirementProfile`; `quick_match_score` is the lightweight fit
//! heuristic for free-text search, where no requirement profile exists.
//! They must not be unified: doing so would silently change one endpoint's
//! behavior.
//!
//! Both are pure and side-effect free; a single job profile can be fanned
//! out across any number of concurrent per-candidate calls.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::lexical::tokenize;
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobRequirementProfile;

const BASE_SCORE: f64 = 50.0;
const MUST_HAVE_POINTS: f64 = 8.0;
const NICE_TO_HAVE_POINTS: f64 = 4.0;
const KEYWORD_POINTS: f64 = 2.0;
const EXPERIENCE_POINTS_CAP: i32 = 10;
const DEGREE_MET_POINTS: f64 = 6.0;
const FIELD_MET_POINTS: f64 = 4.0;
const PREFERRED_DEGREE_POINTS: f64 = 3.0;
const PREFERRED_FIELD_POINTS: f64 = 3.0;
const PRIORITY_SCORE_THRESHOLD: u32 = 85;
const MAX_REASONS: usize = 5;
const MAX_GAPS: usize = 4;

/// Ephemeral per-(candidate, job) result. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Clamped to [0, 100].
    pub score: u32,
    pub reasons: Vec<String>,
    pub gaps: Vec<String>,
    pub is_priority: bool,
}

/// Scores a candidate against a job requirement profile.
///
/// Pure and deterministic: identical inputs always produce identical
/// output. Education checks are additive and independent; candidates with
/// no education data recorded get neither credit nor penalty.
pub fn score_candidate(candidate: &CandidateProfile, job: &JobRequirementProfile) -> ScoreResult {
    let candidate_skills: HashSet<String> =
        candidate.skills.iter().map(|s| s.to_lowercase()).collect();

    let candidate_text = format!(
        "{} {} {}",
        candidate.summary.as_deref().unwrap_or_default(),
        candidate.current_title.as_deref().unwrap_or_default(),
        candidate.desired_roles.join(" ")
    );
    let candidate_tokens: HashSet<String> = tokenize(&candidate_text).into_iter().collect();

    let matched_must: Vec<&String> = job
        .must_have_skills
        .iter()
        .filter(|s| candidate_skills.contains(*s))
        .collect();
    let matched_nice: Vec<&String> = job
        .nice_to_have_skills
        .iter()
        .filter(|s| candidate_skills.contains(*s))
        .collect();
    let matched_keywords: Vec<&String> = job
        .role_keywords
        .iter()
        .filter(|k| candidate_tokens.contains(*k))
        .collect();

    let mut score = BASE_SCORE;
    score += MUST_HAVE_POINTS * matched_must.len() as f64;
    score += NICE_TO_HAVE_POINTS * matched_nice.len() as f64;
    score += KEYWORD_POINTS * matched_keywords.len() as f64;
    score += candidate
        .years_experience
        .map(|y| y.clamp(0, EXPERIENCE_POINTS_CAP))
        .unwrap_or(0) as f64;

    let mut education_reasons: Vec<String> = Vec::new();
    let mut education_gaps: Vec<String> = Vec::new();
    let education = &candidate.education;
    let has_education_data = education.has_data();

    if let Some(required) = job.required_degree_level {
        match education.highest_degree_level {
            Some(level) if level >= required => {
                score += DEGREE_MET_POINTS;
                education_reasons.push(format!("Meets {} degree requirement", required.label()));
            }
            _ if has_education_data => {
                education_gaps.push(format!("{} degree required", required.label()));
            }
            _ => {}
        }
    }

    if !job.required_fields_of_study.is_empty() {
        match education.normalized_field_of_study.as_deref() {
            Some(field) if fields_match(field, &job.required_fields_of_study) => {
                score += FIELD_MET_POINTS;
                education_reasons.push("Relevant field of study".to_string());
            }
            _ if has_education_data => {
                education_gaps.push("Different field of study".to_string());
            }
            _ => {}
        }
    }

    if !job.preferred_degree_levels.is_empty() {
        if let Some(level) = education.highest_degree_level {
            if job.preferred_degree_levels.iter().any(|p| level >= *p) {
                score += PREFERRED_DEGREE_POINTS;
                education_reasons.push("Meets preferred degree level".to_string());
            }
        }
    }

    if !job.preferred_fields_of_study.is_empty() {
        if let Some(field) = education.normalized_field_of_study.as_deref() {
            if fields_match(field, &job.preferred_fields_of_study) {
                score += PREFERRED_FIELD_POINTS;
                education_reasons.push("Preferred field of study".to_string());
            }
        }
    }

    let score = score.round().clamp(0.0, 100.0) as u32;

    // Reasons: education first, then must-have (up to 4), nice-to-have
    // (up to 3), keywords (up to 3); dedup then truncate to 5.
    let mut reasons: Vec<String> = Vec::new();
    reasons.extend(education_reasons);
    reasons.extend(matched_must.iter().take(4).map(|s| s.to_string()));
    reasons.extend(matched_nice.iter().take(3).map(|s| s.to_string()));
    reasons.extend(matched_keywords.iter().take(3).map(|s| s.to_string()));
    let reasons = dedup_truncate(reasons, MAX_REASONS);

    let mut gaps: Vec<String> = Vec::new();
    gaps.extend(education_gaps);
    gaps.extend(
        job.must_have_skills
            .iter()
            .filter(|s| !candidate_skills.contains(*s))
            .cloned(),
    );
    let gaps = dedup_truncate(gaps, MAX_GAPS);

    let is_priority = score >= PRIORITY_SCORE_THRESHOLD
        || matched_must.len() >= job.must_have_skills.len().min(3);

    ScoreResult {
        score,
        reasons,
        gaps,
        is_priority,
    }
}

/// Hard eligibility gate, evaluated before scoring in filtered search
/// flows. Stricter than the scoring gaps: required-and-missing excludes
/// the candidate entirely, as does required-and-insufficient, as does a
/// field that is present but mismatched.
///
/// Exclusion here is a normal filtering outcome, not an error.
pub fn passes_education_requirements(
    candidate: &CandidateProfile,
    job: &JobRequirementProfile,
) -> bool {
    if let Some(required) = job.required_degree_level {
        match candidate.education.highest_degree_level {
            Some(level) if level >= required => {}
            _ => return false,
        }
    }

    if !job.required_fields_of_study.is_empty() {
        match candidate.education.normalized_field_of_study.as_deref() {
            Some(field) if fields_match(field, &job.required_fields_of_study) => {}
            _ => return false,
        }
    }

    true
}

/// Lightweight fit score for free-text search: the fraction of query
/// tokens covered by the candidate's skills. Distinct from
/// `score_candidate` by design; this call site has no requirement profile.
pub fn quick_match_score(query: &str, skills: &[String]) -> Option<u32> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return None;
    }
    let skills_lower: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
    let hits = tokens
        .iter()
        .filter(|token| {
            let token = token.as_str();
            skills_lower
                .iter()
                .any(|skill| skill.contains(token) || token.contains(skill.as_str()))
        })
        .count();
    Some((100.0 * hits as f64 / tokens.len() as f64).round() as u32)
}

/// Substring match in either direction, so "computer_science" matches a
/// candidate field of "computer_science_and_engineering".
fn fields_match(candidate_field: &str, job_fields: &[String]) -> bool {
    job_fields
        .iter()
        .any(|f| f.contains(candidate_field) || candidate_field.contains(f.as_str()))
}

fn dedup_truncate(values: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out: Vec<String> = values.into_iter().filter(|v| seen.insert(v.clone())).collect();
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::SourceMode;
    use crate::models::profile::{DegreeLevel, EducationProfile};
    use chrono::Utc;
    use uuid::Uuid;

    fn candidate_with_skills(skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            id: Uuid::new_v4(),
            full_name: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            summary: None,
            current_title: None,
            current_employer: None,
            desired_roles: vec![],
            location: None,
            years_experience: None,
            expected_salary: None,
            notice_period_days: None,
            availability: None,
            education: EducationProfile::default(),
            indicators: Default::default(),
            hide_current_employer: false,
            hide_salary_history: false,
            is_visible: true,
            created_at: Utc::now(),
        }
    }

    fn job_with_skills(must: &[&str], nice: &[&str]) -> JobRequirementProfile {
        let mut job = JobRequirementProfile::empty(SourceMode::Heuristic);
        job.must_have_skills = must.iter().map(|s| s.to_string()).collect();
        job.nice_to_have_skills = nice.iter().map(|s| s.to_string()).collect();
        job
    }

    #[test]
    fn test_reference_scoring_scenario() {
        // 50 base + 2*8 must + 1*4 nice = 70
        let candidate = candidate_with_skills(&["python", "sql", "docker"]);
        let job = job_with_skills(&["python", "sql"], &["docker"]);

        let result = score_candidate(&candidate, &job);
        assert_eq!(result.score, 70);
        assert_eq!(result.reasons, vec!["python", "sql", "docker"]);
        assert!(result.gaps.is_empty());
        // matched 2 of min(3, 2) = 2 must-haves
        assert!(result.is_priority);
    }

    #[test]
    fn test_score_is_pure() {
        let candidate = candidate_with_skills(&["python"]);
        let job = job_with_skills(&["python", "go"], &[]);
        let a = score_candidate(&candidate, &job);
        let b = score_candidate(&candidate, &job);
        assert_eq!(a.score, b.score);
        assert_eq!(a.reasons, b.reasons);
        assert_eq!(a.gaps, b.gaps);
    }

    #[test]
    fn test_score_clamped_to_100() {
        let skills: Vec<&str> = vec![
            "a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "b1", "b2", "b3", "b4",
        ];
        let mut candidate = candidate_with_skills(&skills);
        candidate.years_experience = Some(30);
        let job = job_with_skills(
            &["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8"],
            &["b1", "b2", "b3", "b4"],
        );
        let result = score_candidate(&candidate, &job);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_unmatched_must_haves_become_gaps() {
        let candidate = candidate_with_skills(&["python"]);
        let job = job_with_skills(&["python", "go", "kafka"], &[]);
        let result = score_candidate(&candidate, &job);
        assert_eq!(result.gaps, vec!["go", "kafka"]);
    }

    #[test]
    fn test_experience_points_capped_at_ten() {
        let candidate_a = {
            let mut c = candidate_with_skills(&[]);
            c.years_experience = Some(10);
            c
        };
        let candidate_b = {
            let mut c = candidate_with_skills(&[]);
            c.years_experience = Some(25);
            c
        };
        let job = job_with_skills(&[], &[]);
        assert_eq!(
            score_candidate(&candidate_a, &job).score,
            score_candidate(&candidate_b, &job).score
        );
    }

    #[test]
    fn test_degree_requirement_met() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Master);
        let mut job = job_with_skills(&[], &[]);
        job.required_degree_level = Some(DegreeLevel::Bachelor);

        let result = score_candidate(&candidate, &job);
        assert_eq!(result.score, 56);
        assert_eq!(result.reasons, vec!["Meets Bachelor's degree requirement"]);
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_degree_below_requirement_is_gap() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Diploma);
        let mut job = job_with_skills(&[], &[]);
        job.required_degree_level = Some(DegreeLevel::Master);

        let result = score_candidate(&candidate, &job);
        assert_eq!(result.gaps, vec!["Master's degree required"]);
    }

    #[test]
    fn test_no_education_data_neither_credit_nor_penalty() {
        let candidate = candidate_with_skills(&[]);
        let mut job = job_with_skills(&[], &[]);
        job.required_degree_level = Some(DegreeLevel::Phd);
        job.required_fields_of_study = vec!["computer_science".to_string()];

        let result = score_candidate(&candidate, &job);
        assert_eq!(result.score, 50);
        assert!(result.reasons.is_empty());
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_field_substring_match_both_directions() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.normalized_field_of_study =
            Some("computer_science_and_engineering".to_string());
        let mut job = job_with_skills(&[], &[]);
        job.required_fields_of_study = vec!["computer_science".to_string()];

        let result = score_candidate(&candidate, &job);
        assert!(result
            .reasons
            .contains(&"Relevant field of study".to_string()));
    }

    #[test]
    fn test_mismatched_field_is_gap() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.normalized_field_of_study = Some("economics".to_string());
        let mut job = job_with_skills(&[], &[]);
        job.required_fields_of_study = vec!["computer_science".to_string()];

        let result = score_candidate(&candidate, &job);
        assert_eq!(result.gaps, vec!["Different field of study"]);
    }

    #[test]
    fn test_preferred_degree_never_generates_gap() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Diploma);
        let mut job = job_with_skills(&[], &[]);
        job.preferred_degree_levels = vec![DegreeLevel::Phd];

        let result = score_candidate(&candidate, &job);
        assert!(result.gaps.is_empty());
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_preferred_degree_any_match() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Master);
        let mut job = job_with_skills(&[], &[]);
        job.preferred_degree_levels = vec![DegreeLevel::Phd, DegreeLevel::Bachelor];

        let result = score_candidate(&candidate, &job);
        assert_eq!(result.score, 53);
        assert!(result
            .reasons
            .contains(&"Meets preferred degree level".to_string()));
    }

    #[test]
    fn test_keyword_matches_from_summary_and_title() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.summary = Some("Backend engineer building microservices".to_string());
        candidate.current_title = Some("Platform Engineer".to_string());
        let mut job = job_with_skills(&[], &[]);
        job.role_keywords = vec!["backend".to_string(), "microservices".to_string()];

        let result = score_candidate(&candidate, &job);
        assert_eq!(result.score, 54);
        assert!(result.reasons.contains(&"backend".to_string()));
    }

    #[test]
    fn test_reasons_truncated_to_five() {
        let mut candidate = candidate_with_skills(&["a", "b", "c", "d", "e", "f"]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Phd);
        let mut job = job_with_skills(&["a", "b", "c", "d", "e", "f"], &[]);
        job.required_degree_level = Some(DegreeLevel::Bachelor);

        let result = score_candidate(&candidate, &job);
        assert_eq!(result.reasons.len(), 5);
        // education reason takes priority
        assert_eq!(result.reasons[0], "Meets Bachelor's degree requirement");
    }

    #[test]
    fn test_gaps_truncated_to_four() {
        let candidate = candidate_with_skills(&[]);
        let job = job_with_skills(&["a", "b", "c", "d", "e", "f"], &[]);
        let result = score_candidate(&candidate, &job);
        assert_eq!(result.gaps.len(), 4);
    }

    #[test]
    fn test_priority_by_high_score() {
        let mut candidate = candidate_with_skills(&["a", "b", "c", "d"]);
        candidate.years_experience = Some(10);
        let job = job_with_skills(&["a", "b", "c", "d"], &[]);
        // 50 + 32 + 10 = 92
        let result = score_candidate(&candidate, &job);
        assert!(result.score >= 85);
        assert!(result.is_priority);
    }

    #[test]
    fn test_priority_by_must_have_coverage() {
        let candidate = candidate_with_skills(&["a", "b", "c"]);
        let job = job_with_skills(&["a", "b", "c", "d", "e"], &[]);
        // 50 + 24 = 74 < 85 but matched 3 >= min(3, 5)
        let result = score_candidate(&candidate, &job);
        assert!(result.score < 85);
        assert!(result.is_priority);
    }

    #[test]
    fn test_not_priority() {
        let candidate = candidate_with_skills(&["a"]);
        let job = job_with_skills(&["a", "b", "c", "d"], &[]);
        let result = score_candidate(&candidate, &job);
        assert!(!result.is_priority);
    }

    // Hard gate

    #[test]
    fn test_gate_excludes_missing_degree() {
        let candidate = candidate_with_skills(&[]);
        let mut job = job_with_skills(&[], &[]);
        job.required_degree_level = Some(DegreeLevel::Bachelor);
        assert!(!passes_education_requirements(&candidate, &job));
    }

    #[test]
    fn test_gate_excludes_insufficient_degree() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Diploma);
        let mut job = job_with_skills(&[], &[]);
        job.required_degree_level = Some(DegreeLevel::Bachelor);
        assert!(!passes_education_requirements(&candidate, &job));
    }

    #[test]
    fn test_gate_excludes_mismatched_field() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Master);
        candidate.education.normalized_field_of_study = Some("marketing".to_string());
        let mut job = job_with_skills(&[], &[]);
        job.required_fields_of_study = vec!["computer_science".to_string()];
        assert!(!passes_education_requirements(&candidate, &job));
    }

    #[test]
    fn test_gate_passes_when_requirements_met() {
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Master);
        candidate.education.normalized_field_of_study = Some("computer_science".to_string());
        let mut job = job_with_skills(&[], &[]);
        job.required_degree_level = Some(DegreeLevel::Bachelor);
        job.required_fields_of_study = vec!["computer_science".to_string()];
        assert!(passes_education_requirements(&candidate, &job));
    }

    #[test]
    fn test_gate_no_requirements_passes_everyone() {
        let candidate = candidate_with_skills(&[]);
        let job = job_with_skills(&["python"], &[]);
        assert!(passes_education_requirements(&candidate, &job));
    }

    #[test]
    fn test_gate_stricter_than_scoring_bonus() {
        // If the gate excludes a candidate, the scorer could not have
        // granted an education bonus for the same requirement.
        let mut candidate = candidate_with_skills(&[]);
        candidate.education.highest_degree_level = Some(DegreeLevel::Bachelor);
        let mut job = job_with_skills(&[], &[]);
        job.required_degree_level = Some(DegreeLevel::Phd);

        assert!(!passes_education_requirements(&candidate, &job));
        let result = score_candidate(&candidate, &job);
        assert!(!result
            .reasons
            .iter()
            .any(|r| r.contains("degree requirement")));
    }

    // Quick match score

    #[test]
    fn test_quick_match_full_and_partial() {
        let skills = vec!["python".to_string(), "postgresql".to_string()];
        assert_eq!(quick_match_score("python postgresql", &skills), Some(100));
        assert_eq!(quick_match_score("python kafka", &skills), Some(50));
        assert_eq!(quick_match_score("kafka", &skills), Some(0));
    }

    #[test]
    fn test_quick_match_substring_hit() {
        let skills = vec!["postgresql".to_string()];
        // "postgres" is a substring of the stored skill
        assert_eq!(quick_match_score("postgres", &skills), Some(100));
    }

    #[test]
    fn test_quick_match_none_without_tokens() {
        let skills = vec!["python".to_string()];
        assert_eq!(quick_match_score("", &skills), None);
        assert_eq!(quick_match_score("a the of", &skills), None);
    }
}
