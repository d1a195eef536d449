//! Derived candidate profile types: degree/experience enums and the
//! denormalized education and experience summaries recomputed on every
//! resume change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Academic degree level, totally ordered: DIPLOMA < BACHELOR < MASTER < PHD.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DegreeLevel {
    Diploma,
    Bachelor,
    Master,
    Phd,
}

impl DegreeLevel {
    /// Human-readable label used in score reasons and gaps.
    pub fn label(&self) -> &'static str {
        match self {
            DegreeLevel::Diploma => "Diploma",
            DegreeLevel::Bachelor => "Bachelor's",
            DegreeLevel::Master => "Master's",
            DegreeLevel::Phd => "PhD",
        }
    }

    /// Parses the storage token form ("PHD", "BACHELOR", ...).
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "DIPLOMA" => Some(DegreeLevel::Diploma),
            "BACHELOR" => Some(DegreeLevel::Bachelor),
            "MASTER" => Some(DegreeLevel::Master),
            "PHD" => Some(DegreeLevel::Phd),
            _ => None,
        }
    }

    /// Storage token form, inverse of `parse_token`.
    pub fn as_token(&self) -> &'static str {
        match self {
            DegreeLevel::Diploma => "DIPLOMA",
            DegreeLevel::Bachelor => "BACHELOR",
            DegreeLevel::Master => "MASTER",
            DegreeLevel::Phd => "PHD",
        }
    }
}

/// Career stage bucket, totally ordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceBand {
    StudentFresh,
    Junior,
    Mid,
    Senior,
}

impl ExperienceBand {
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "STUDENT_FRESH" => Some(ExperienceBand::StudentFresh),
            "JUNIOR" => Some(ExperienceBand::Junior),
            "MID" => Some(ExperienceBand::Mid),
            "SENIOR" => Some(ExperienceBand::Senior),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            ExperienceBand::StudentFresh => "STUDENT_FRESH",
            ExperienceBand::Junior => "JUNIOR",
            ExperienceBand::Mid => "MID",
            ExperienceBand::Senior => "SENIOR",
        }
    }
}

/// Education summary derived from a candidate's resume education entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationProfile {
    pub highest_degree_level: Option<DegreeLevel>,
    /// Field of study exactly as written on the resume.
    pub primary_field_of_study: Option<String>,
    /// Canonical lowercase snake_case token, comparable across candidates.
    pub normalized_field_of_study: Option<String>,
    pub graduation_date: Option<NaiveDate>,
    pub graduation_year: Option<i32>,
}

impl EducationProfile {
    /// Whether any education signal was extracted at all. Candidates with
    /// no data are neither credited nor penalized by the scorer.
    pub fn has_data(&self) -> bool {
        self.highest_degree_level.is_some()
            || self.normalized_field_of_study.is_some()
            || self.graduation_year.is_some()
    }
}

/// Experience summary derived from experience, project, and certification
/// entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceIndicators {
    pub internship_count: u32,
    pub project_count: u32,
    pub freelance_count: u32,
    pub training_flag: bool,
    pub experience_band: Option<ExperienceBand>,
}
