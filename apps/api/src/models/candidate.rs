//! Candidate-side models: the searchable profile view, raw resume section
//! entries consumed by the normalizer, and the sqlx row for the denormalized
//! candidates table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::profile::{
    DegreeLevel, EducationProfile, ExperienceBand, ExperienceIndicators,
};

/// A candidate's searchable attributes. This is a read-only view assembled
/// from the candidates table; the engine never writes it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub skills: Vec<String>,
    pub summary: Option<String>,
    pub current_title: Option<String>,
    pub current_employer: Option<String>,
    pub desired_roles: Vec<String>,
    pub location: Option<String>,
    pub years_experience: Option<i32>,
    pub expected_salary: Option<i64>,
    pub notice_period_days: Option<i32>,
    pub availability: Option<String>,
    pub education: EducationProfile,
    pub indicators: ExperienceIndicators,
    pub hide_current_employer: bool,
    pub hide_salary_history: bool,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

/// Raw education entry as stored with the resume. Free text throughout;
/// the normalizer owns all interpretation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub end_date: Option<String>,
}

/// Raw experience entry. Dates are kept as strings because resumes carry
/// everything from ISO dates to "May 2020" to bare years.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct ExperienceEntry {
    pub position: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct ProjectEntry {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: Option<String>,
}

/// All resume sections for one candidate, as returned by the resume-section
/// reader collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeSnapshot {
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
}

/// Row shape of the denormalized candidates table.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub skills: Vec<String>,
    pub summary: Option<String>,
    pub current_title: Option<String>,
    pub current_employer: Option<String>,
    pub desired_roles: Vec<String>,
    pub location: Option<String>,
    pub years_experience: Option<i32>,
    pub expected_salary: Option<i64>,
    pub notice_period_days: Option<i32>,
    pub availability: Option<String>,
    pub highest_degree_level: Option<String>,
    pub primary_field_of_study: Option<String>,
    pub normalized_field_of_study: Option<String>,
    pub graduation_date: Option<chrono::NaiveDate>,
    pub graduation_year: Option<i32>,
    pub internship_count: i32,
    pub project_count: i32,
    pub freelance_count: i32,
    pub training_flag: bool,
    pub experience_band: Option<String>,
    pub hide_current_employer: bool,
    pub hide_salary_history: bool,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateRow> for CandidateProfile {
    fn from(row: CandidateRow) -> Self {
        CandidateProfile {
            id: row.id,
            full_name: row.full_name,
            skills: row.skills,
            summary: row.summary,
            current_title: row.current_title,
            current_employer: row.current_employer,
            desired_roles: row.desired_roles,
            location: row.location,
            years_experience: row.years_experience,
            expected_salary: row.expected_salary,
            notice_period_days: row.notice_period_days,
            availability: row.availability,
            education: EducationProfile {
                highest_degree_level: row
                    .highest_degree_level
                    .as_deref()
                    .and_then(DegreeLevel::parse_token),
                primary_field_of_study: row.primary_field_of_study,
                normalized_field_of_study: row.normalized_field_of_study,
                graduation_date: row.graduation_date,
                graduation_year: row.graduation_year,
            },
            indicators: ExperienceIndicators {
                internship_count: row.internship_count.max(0) as u32,
                project_count: row.project_count.max(0) as u32,
                freelance_count: row.freelance_count.max(0) as u32,
                training_flag: row.training_flag,
                experience_band: row
                    .experience_band
                    .as_deref()
                    .and_then(ExperienceBand::parse_token),
            },
            hide_current_employer: row.hide_current_employer,
            hide_salary_history: row.hide_salary_history,
            is_visible: row.is_visible,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_row() -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            full_name: Some("Jane Doe".to_string()),
            skills: vec!["Python".to_string()],
            summary: None,
            current_title: Some("Engineer".to_string()),
            current_employer: Some("Acme".to_string()),
            desired_roles: vec![],
            location: None,
            years_experience: Some(4),
            expected_salary: None,
            notice_period_days: None,
            availability: None,
            highest_degree_level: Some("MASTER".to_string()),
            primary_field_of_study: Some("Computer Science".to_string()),
            normalized_field_of_study: Some("computer_science".to_string()),
            graduation_date: None,
            graduation_year: Some(2019),
            internship_count: 1,
            project_count: 2,
            freelance_count: 0,
            training_flag: false,
            experience_band: Some("MID".to_string()),
            hide_current_employer: false,
            hide_salary_history: false,
            is_visible: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion_parses_enum_tokens() {
        let profile: CandidateProfile = sample_row().into();
        assert_eq!(
            profile.education.highest_degree_level,
            Some(DegreeLevel::Master)
        );
        assert_eq!(
            profile.indicators.experience_band,
            Some(ExperienceBand::Mid)
        );
    }

    #[test]
    fn test_row_conversion_tolerates_unknown_tokens() {
        let mut row = sample_row();
        row.highest_degree_level = Some("BOOTCAMP".to_string());
        row.experience_band = Some("".to_string());
        let profile: CandidateProfile = row.into();
        assert_eq!(profile.education.highest_degree_level, None);
        assert_eq!(profile.indicators.experience_band, None);
    }
}
