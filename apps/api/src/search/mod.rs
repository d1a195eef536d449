//! Search/filter orchestrator.
//!
//! Applies structured filters over the visible candidate pool, scores each
//! result, checks the recruiter's unlock relationships in one batch, and
//! applies the anonymizer plus privacy-field redaction to every
//! non-unlocked candidate.

pub mod handlers;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::anonymize::anonymize_name;
use crate::errors::AppError;
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobRequirementProfile;
use crate::models::profile::{DegreeLevel, ExperienceBand};
use crate::scoring::{passes_education_requirements, quick_match_score, score_candidate, ScoreResult};
use crate::store::{CandidatePool, UnlockLedger};

const DEFAULT_PAGE_LIMIT: u32 = 20;
const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Recency proxy; newest profiles first.
    #[default]
    Relevance,
    ExperienceDesc,
    CreatedDesc,
}

/// Conjunctive filter set over the candidate pool. Every populated field
/// narrows the result; empty collections are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub min_experience: Option<i32>,
    #[serde(default)]
    pub max_experience: Option<i32>,
    #[serde(default)]
    pub min_salary: Option<i64>,
    #[serde(default)]
    pub max_salary: Option<i64>,
    #[serde(default)]
    pub max_notice_period_days: Option<i32>,
    #[serde(default)]
    pub degree_levels: Vec<DegreeLevel>,
    #[serde(default)]
    pub fields_of_study: Vec<String>,
    #[serde(default)]
    pub graduation_year_min: Option<i32>,
    #[serde(default)]
    pub graduation_year_max: Option<i32>,
    #[serde(default)]
    pub experience_bands: Vec<ExperienceBand>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub sort: SortKey,
}

impl SearchFilters {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.limit() as i64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + limit as i64 - 1) / limit as i64
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// One search hit, already privacy-masked where required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: Uuid,
    pub display_name: String,
    pub current_title: Option<String>,
    pub current_employer: Option<String>,
    pub location: Option<String>,
    pub years_experience: Option<i32>,
    pub expected_salary: Option<i64>,
    pub skills: Vec<String>,
    pub summary: Option<String>,
    pub unlocked: bool,
    pub match_score: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub pagination: Pagination,
}

/// One hit of a job-targeted ranking, carrying the full score breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedHit {
    #[serde(flatten)]
    pub hit: SearchHit,
    pub score: ScoreResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatchResponse {
    pub results: Vec<RankedHit>,
    pub pagination: Pagination,
}

/// Free-text/structured candidate search.
///
/// The unlock lookup is one batch query for the whole page; it gates
/// display only, never inclusion.
pub async fn run_search(
    pool: &dyn CandidatePool,
    unlocks: &dyn UnlockLedger,
    recruiter_id: Uuid,
    filters: &SearchFilters,
) -> Result<SearchResponse, AppError> {
    let (candidates, total) = pool.search(filters).await?;

    let ids: Vec<Uuid> = candidates.iter().map(|c| c.id).collect();
    let unlocked = unlocks.unlocked_subset(recruiter_id, &ids).await?;

    let query = filters.query.as_deref().unwrap_or_default();
    let results = candidates
        .into_iter()
        .map(|candidate| {
            let match_score = if query.trim().is_empty() {
                None
            } else {
                quick_match_score(query, &candidate.skills)
            };
            build_hit(candidate, &unlocked, match_score)
        })
        .collect();

    Ok(SearchResponse {
        results,
        pagination: Pagination::new(filters.page(), filters.limit(), total),
    })
}

/// Job-targeted ranking: applies the hard education eligibility gate, then
/// the full scorer, and returns hits sorted by score descending.
///
/// Gate exclusion is a normal filtering outcome; excluded candidates are
/// simply absent from the result, not logged as failures.
pub async fn run_job_match(
    pool: &dyn CandidatePool,
    unlocks: &dyn UnlockLedger,
    recruiter_id: Uuid,
    job: &JobRequirementProfile,
    filters: &SearchFilters,
) -> Result<JobMatchResponse, AppError> {
    let (candidates, total) = pool.search(filters).await?;

    let eligible: Vec<CandidateProfile> = candidates
        .into_iter()
        .filter(|c| passes_education_requirements(c, job))
        .collect();

    let ids: Vec<Uuid> = eligible.iter().map(|c| c.id).collect();
    let unlocked = unlocks.unlocked_subset(recruiter_id, &ids).await?;

    let mut results: Vec<RankedHit> = eligible
        .into_iter()
        .map(|candidate| {
            let score = score_candidate(&candidate, job);
            let match_score = Some(score.score);
            RankedHit {
                hit: build_hit(candidate, &unlocked, match_score),
                score,
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.score.cmp(&a.score.score));

    Ok(JobMatchResponse {
        results,
        pagination: Pagination::new(filters.page(), filters.limit(), total),
    })
}

/// Builds the outward-facing hit, masking identity and redacting privacy
/// fields unless the recruiter has unlocked the candidate.
fn build_hit(
    candidate: CandidateProfile,
    unlocked: &HashSet<Uuid>,
    match_score: Option<u32>,
) -> SearchHit {
    let is_unlocked = unlocked.contains(&candidate.id);

    let display_name = if is_unlocked {
        candidate
            .full_name
            .clone()
            .unwrap_or_else(|| anonymize_name(None, &candidate.id.to_string()))
    } else {
        anonymize_name(candidate.full_name.as_deref(), &candidate.id.to_string())
    };

    let current_employer = if !is_unlocked && candidate.hide_current_employer {
        None
    } else {
        candidate.current_employer
    };
    let expected_salary = if !is_unlocked && candidate.hide_salary_history {
        None
    } else {
        candidate.expected_salary
    };

    SearchHit {
        id: candidate.id,
        display_name,
        current_title: candidate.current_title,
        current_employer,
        location: candidate.location,
        years_experience: candidate.years_experience,
        expected_salary,
        skills: candidate.skills,
        summary: candidate.summary,
        unlocked: is_unlocked,
        match_score,
    }
}
