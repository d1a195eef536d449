//! Job-side models: the canonical requirement profile derived once per
//! posting, with provenance recording whether it came from the AI path or
//! the heuristic fallback.

use serde::{Deserialize, Serialize};

use crate::models::profile::DegreeLevel;

/// Provenance of a `JobRequirementProfile`. Observability only; the two
/// paths produce the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceMode {
    Ai,
    Heuristic,
}

/// Per-factor weights returned by the analyzer.
///
/// Informational output only: the scorer keeps its fixed point values and
/// never reads these. Wiring them in would change scores across the whole
/// pool, so they stay aspirational configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementWeights {
    pub skill_weight: f64,
    pub experience_weight: f64,
    pub keyword_weight: f64,
    pub education_weight: f64,
}

impl Default for RequirementWeights {
    fn default() -> Self {
        Self {
            skill_weight: 0.4,
            experience_weight: 0.25,
            keyword_weight: 0.15,
            education_weight: 0.2,
        }
    }
}

/// Canonical requirements derived from a job posting. Immutable after
/// creation; the caller persists it alongside the posting.
///
/// Skill and keyword collections are lower-cased and deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirementProfile {
    pub must_have_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub role_keywords: Vec<String>,
    pub years_exp_min: Option<i32>,
    pub years_exp_max: Option<i32>,
    pub required_degree_level: Option<DegreeLevel>,
    pub preferred_degree_levels: Vec<DegreeLevel>,
    pub required_fields_of_study: Vec<String>,
    pub preferred_fields_of_study: Vec<String>,
    pub weights: RequirementWeights,
    pub summary: Option<String>,
    pub responsibilities: Vec<String>,
    pub red_flags: Vec<String>,
    pub languages: Vec<String>,
    pub source_mode: SourceMode,
}

impl JobRequirementProfile {
    /// An empty profile with the given provenance. Fields are filled in by
    /// the analyzer; anything left untouched stays null/empty rather than
    /// failing the whole analysis.
    pub fn empty(source_mode: SourceMode) -> Self {
        Self {
            must_have_skills: Vec::new(),
            nice_to_have_skills: Vec::new(),
            role_keywords: Vec::new(),
            years_exp_min: None,
            years_exp_max: None,
            required_degree_level: None,
            preferred_degree_levels: Vec::new(),
            required_fields_of_study: Vec::new(),
            preferred_fields_of_study: Vec::new(),
            weights: RequirementWeights::default(),
            summary: None,
            responsibilities: Vec::new(),
            red_flags: Vec::new(),
            languages: Vec::new(),
            source_mode,
        }
    }
}
