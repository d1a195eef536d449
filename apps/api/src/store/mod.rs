//! Collaborator seams. The engine reads the candidate pool and the unlock
//! ledger, reads raw resume sections, and writes derived profiles back
//! through the sink during backfill. It never writes candidate data itself.
//!
//! Carried in `AppState` as `Arc<dyn ...>` so tests can swap in-memory
//! implementations without touching handler or orchestrator code.

pub mod postgres;

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateProfile, ResumeSnapshot};
use crate::models::profile::{EducationProfile, ExperienceIndicators};
use crate::search::SearchFilters;

/// Read access to the candidate pool: a filtered page plus a total count.
/// Only visible candidates are ever returned.
#[async_trait]
pub trait CandidatePool: Send + Sync {
    async fn search(
        &self,
        filters: &SearchFilters,
    ) -> Result<(Vec<CandidateProfile>, i64), AppError>;

    /// Stable ID paging for batch jobs.
    async fn page_ids(&self, offset: i64, limit: i64) -> Result<Vec<Uuid>, AppError>;
}

/// Read access to the recruiter/candidate unlock relationship. Owned by the
/// billing subsystem; the engine only checks membership.
#[async_trait]
pub trait UnlockLedger: Send + Sync {
    async fn unlocked_subset(
        &self,
        recruiter_id: Uuid,
        candidate_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, AppError>;
}

/// Read access to raw resume sections for one candidate.
#[async_trait]
pub trait ResumeSections: Send + Sync {
    async fn sections_for(&self, candidate_id: Uuid) -> Result<ResumeSnapshot, AppError>;
}

/// Write path for derived profiles. The caller owns the denormalized
/// columns; writes are idempotent so the backfill can be re-run safely.
#[async_trait]
pub trait ProfileSink: Send + Sync {
    async fn write_profile(
        &self,
        candidate_id: Uuid,
        education: &EducationProfile,
        indicators: &ExperienceIndicators,
        years_experience: Option<i32>,
    ) -> Result<(), AppError>;
}
