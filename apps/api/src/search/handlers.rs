use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analyzer::{analyze_job_posting, JobPosting};
use crate::errors::AppError;
use crate::models::job::JobRequirementProfile;
use crate::normalizer::backfill::{run_profile_backfill, BackfillReport, DEFAULT_BATCH_SIZE};
use crate::search::{run_job_match, run_search, JobMatchResponse, SearchFilters, SearchResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    #[serde(default)]
    pub remote: bool,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub requirements: JobRequirementProfile,
}

/// POST /api/v1/jobs/analyze
///
/// Always returns a profile; a failed AI call degrades to the heuristic
/// extractor, observable only through `source_mode`.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if req.description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description must not be empty".to_string(),
        ));
    }

    let posting = JobPosting {
        jd_text: &req.description,
        title: &req.title,
        location: req.location.as_deref(),
        remote: req.remote,
    };
    let requirements = analyze_job_posting(&state.llm, &posting).await;
    Ok(Json(AnalyzeResponse { requirements }))
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub recruiter_id: Uuid,
    #[serde(flatten)]
    pub filters: SearchFilters,
}

/// POST /api/v1/candidates/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let response = run_search(
        state.pool.as_ref(),
        state.unlocks.as_ref(),
        req.recruiter_id,
        &req.filters,
    )
    .await?;
    Ok(Json(response))
}

#[derive(Deserialize)]
pub struct JobMatchRequest {
    pub recruiter_id: Uuid,
    pub requirements: JobRequirementProfile,
    #[serde(flatten)]
    pub filters: SearchFilters,
}

/// POST /api/v1/candidates/match
///
/// Ranks the filtered pool against a stored requirement profile. The
/// education eligibility gate runs before scoring; gated-out candidates
/// are absent from the result, not errors.
pub async fn handle_job_match(
    State(state): State<AppState>,
    Json(req): Json<JobMatchRequest>,
) -> Result<Json<JobMatchResponse>, AppError> {
    let response = run_job_match(
        state.pool.as_ref(),
        state.unlocks.as_ref(),
        req.recruiter_id,
        &req.requirements,
        &req.filters,
    )
    .await?;
    Ok(Json(response))
}

#[derive(Deserialize, Default)]
pub struct BackfillRequest {
    pub batch_size: Option<i64>,
}

/// POST /api/v1/admin/backfill/profiles
///
/// Runs synchronously; the pool is small enough that a blocking admin call
/// is acceptable. Returns processed/failed counts.
pub async fn handle_profile_backfill(
    State(state): State<AppState>,
    Json(req): Json<BackfillRequest>,
) -> Result<Json<BackfillReport>, AppError> {
    let batch_size = req.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
    if batch_size <= 0 {
        return Err(AppError::Validation(
            "batch_size must be positive".to_string(),
        ));
    }

    let report = run_profile_backfill(
        state.pool.as_ref(),
        state.sections.as_ref(),
        state.profiles.as_ref(),
        batch_size,
    )
    .await?;
    Ok(Json(report))
}
