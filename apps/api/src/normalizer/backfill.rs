//! Batched recompute of derived candidate profiles.
//!
//! Pages through the candidate pool in fixed-size batches until exhausted,
//! re-deriving the education profile and experience indicators from raw
//! resume sections and writing them through the profile sink. Idempotent:
//! re-running produces the same rows.

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::normalizer::education::derive_education_profile;
use crate::normalizer::experience::{derive_experience_indicators, derive_years_experience};
use crate::store::{CandidatePool, ProfileSink, ResumeSections};

pub const DEFAULT_BATCH_SIZE: i64 = 100;

/// Summary of one backfill run.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct BackfillReport {
    pub processed: u64,
    pub failed: u64,
}

/// Recomputes derived profiles for every candidate in the pool.
///
/// Per-candidate failures are logged and counted but do not abort the run;
/// a candidate with unreadable sections keeps its previous derived columns.
pub async fn run_profile_backfill(
    pool: &dyn CandidatePool,
    sections: &dyn ResumeSections,
    sink: &dyn ProfileSink,
    batch_size: i64,
) -> Result<BackfillReport, AppError> {
    let batch_size = batch_size.max(1);
    let mut report = BackfillReport::default();
    let mut offset = 0i64;

    loop {
        let ids = pool.page_ids(offset, batch_size).await?;
        if ids.is_empty() {
            break;
        }
        let page_len = ids.len() as i64;

        for candidate_id in ids {
            match recompute_one(sections, sink, candidate_id).await {
                Ok(()) => report.processed += 1,
                Err(e) => {
                    warn!(%candidate_id, error = %e, "profile recompute failed, skipping");
                    report.failed += 1;
                }
            }
        }

        info!(
            offset,
            processed = report.processed,
            failed = report.failed,
            "backfill batch complete"
        );
        offset += page_len;
    }

    Ok(report)
}

async fn recompute_one(
    sections: &dyn ResumeSections,
    sink: &dyn ProfileSink,
    candidate_id: Uuid,
) -> Result<(), AppError> {
    let snapshot = sections.sections_for(candidate_id).await?;

    let education = derive_education_profile(&snapshot.education);
    let years_experience = derive_years_experience(&snapshot.experience);
    let indicators = derive_experience_indicators(
        &snapshot.experience,
        &snapshot.projects,
        &snapshot.education,
        &snapshot.certifications,
        years_experience,
        education.graduation_date,
    );

    sink.write_profile(candidate_id, &education, &indicators, years_experience)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{CandidateProfile, EducationEntry, ResumeSnapshot};
    use crate::models::profile::{DegreeLevel, EducationProfile, ExperienceIndicators};
    use crate::search::SearchFilters;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedPool {
        ids: Vec<Uuid>,
    }

    #[async_trait]
    impl CandidatePool for FixedPool {
        async fn search(
            &self,
            _filters: &SearchFilters,
        ) -> Result<(Vec<CandidateProfile>, i64), AppError> {
            Ok((vec![], 0))
        }

        async fn page_ids(&self, offset: i64, limit: i64) -> Result<Vec<Uuid>, AppError> {
            let start = (offset as usize).min(self.ids.len());
            let end = (start + limit as usize).min(self.ids.len());
            Ok(self.ids[start..end].to_vec())
        }
    }

    struct FixedSections;

    #[async_trait]
    impl ResumeSections for FixedSections {
        async fn sections_for(&self, _candidate_id: Uuid) -> Result<ResumeSnapshot, AppError> {
            Ok(ResumeSnapshot {
                education: vec![EducationEntry {
                    degree: Some("B.Sc".to_string()),
                    field_of_study: Some("Computer Science".to_string()),
                    institution: None,
                    end_date: Some("2021".to_string()),
                }],
                ..Default::default()
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        writes: Mutex<Vec<(Uuid, Option<DegreeLevel>)>>,
    }

    #[async_trait]
    impl ProfileSink for RecordingSink {
        async fn write_profile(
            &self,
            candidate_id: Uuid,
            education: &EducationProfile,
            _indicators: &ExperienceIndicators,
            _years_experience: Option<i32>,
        ) -> Result<(), AppError> {
            self.writes
                .lock()
                .unwrap()
                .push((candidate_id, education.highest_degree_level));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_backfill_pages_until_exhausted() {
        let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let pool = FixedPool { ids: ids.clone() };
        let sink = RecordingSink::default();

        let report = run_profile_backfill(&pool, &FixedSections, &sink, 2)
            .await
            .unwrap();

        assert_eq!(report.processed, 5);
        assert_eq!(report.failed, 0);
        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 5);
        assert!(writes.iter().all(|(_, d)| *d == Some(DegreeLevel::Bachelor)));
    }

    #[tokio::test]
    async fn test_backfill_empty_pool() {
        let pool = FixedPool { ids: vec![] };
        let sink = RecordingSink::default();
        let report = run_profile_backfill(&pool, &FixedSections, &sink, 10)
            .await
            .unwrap();
        assert_eq!(report.processed, 0);
    }
}
