//! Defensive coercion of model JSON into a `JobRequirementProfile`.
//!
//! The generation service is never trusted blindly: every field is
//! individually type-checked and defaulted, so a response with some valid
//! and some invalid fields is still accepted with only the invalid fields
//! degraded to null/empty.

use serde_json::Value;

use crate::lexical::unique_list;
use crate::models::job::{JobRequirementProfile, RequirementWeights, SourceMode};
use crate::models::profile::DegreeLevel;
use crate::normalizer::degree::infer_degree_level;
use crate::normalizer::field::normalize_field_of_study;

/// Builds an AI-sourced profile from an already-parsed JSON object.
pub fn profile_from_json(value: &Value) -> JobRequirementProfile {
    let mut profile = JobRequirementProfile::empty(SourceMode::Ai);

    profile.must_have_skills = lowercased_list(value, "must_have_skills");
    profile.nice_to_have_skills = lowercased_list(value, "nice_to_have_skills");
    profile.role_keywords = lowercased_list(value, "role_keywords");

    profile.years_exp_min = bounded_int(value, "years_exp_min");
    profile.years_exp_max = bounded_int(value, "years_exp_max");

    profile.required_degree_level = value
        .get("required_degree_level")
        .and_then(Value::as_str)
        .and_then(coerce_degree);

    profile.preferred_degree_levels = string_items(value, "preferred_degree_levels")
        .into_iter()
        .filter_map(|s| coerce_degree(&s))
        .collect();
    let mut seen = std::collections::HashSet::new();
    profile.preferred_degree_levels.retain(|d| seen.insert(*d));

    profile.required_fields_of_study = field_list(value, "required_fields_of_study");
    profile.preferred_fields_of_study = field_list(value, "preferred_fields_of_study");

    if let Some(weights) = value.get("weights").and_then(Value::as_object) {
        let defaults = RequirementWeights::default();
        let read = |key: &str, fallback: f64| {
            weights
                .get(key)
                .and_then(Value::as_f64)
                .filter(|w| w.is_finite() && *w >= 0.0)
                .unwrap_or(fallback)
        };
        profile.weights = RequirementWeights {
            skill_weight: read("skill_weight", defaults.skill_weight),
            experience_weight: read("experience_weight", defaults.experience_weight),
            keyword_weight: read("keyword_weight", defaults.keyword_weight),
            education_weight: read("education_weight", defaults.education_weight),
        };
    }

    profile.summary = value
        .get("summary")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    profile.responsibilities = unique_list(string_items(value, "responsibilities"));
    profile.red_flags = unique_list(string_items(value, "red_flags"));
    profile.languages = unique_list(string_items(value, "languages"));

    profile
}

/// Degree strings from the model go through the same inference cascade as
/// resume text, so "Bachelor's degree" and "BACHELOR" both land correctly.
fn coerce_degree(text: &str) -> Option<DegreeLevel> {
    DegreeLevel::parse_token(text).or_else(|| infer_degree_level(text))
}

fn string_items(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn lowercased_list(value: &Value, key: &str) -> Vec<String> {
    unique_list(
        string_items(value, key)
            .iter()
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>(),
    )
}

fn field_list(value: &Value, key: &str) -> Vec<String> {
    unique_list(
        string_items(value, key)
            .iter()
            .filter_map(|s| normalize_field_of_study(s))
            .collect::<Vec<_>>(),
    )
}

fn bounded_int(value: &Value, key: &str) -> Option<i32> {
    value
        .get(key)
        .and_then(Value::as_i64)
        .filter(|n| (0..=60).contains(n))
        .map(|n| n as i32)
}
