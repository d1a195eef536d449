//! Postgres-backed store. One type implements every collaborator seam;
//! handlers still depend on the traits so tests can swap in-memory fakes.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::lexical::build_case_variants;
use crate::models::candidate::{
    CandidateProfile, CandidateRow, CertificationEntry, EducationEntry, ExperienceEntry,
    ProjectEntry, ResumeSnapshot,
};
use crate::models::profile::{EducationProfile, ExperienceIndicators};
use crate::normalizer::field::normalize_field_of_study;
use crate::search::{SearchFilters, SortKey};
use crate::store::{CandidatePool, ProfileSink, ResumeSections, UnlockLedger};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Appends the conjunctive filter clauses. Shared by the count and page
/// queries so the total always matches the filter set.
fn push_filters(builder: &mut QueryBuilder<'_, sqlx::Postgres>, filters: &SearchFilters) {
    if let Some(query) = filters.query.as_deref() {
        let query = query.trim();
        if !query.is_empty() {
            let pattern = format!("%{query}%");
            builder.push(" AND (summary ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR current_title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR EXISTS (SELECT 1 FROM unnest(skills) s WHERE s ILIKE ");
            builder.push_bind(pattern);
            builder.push("))");
        }
    }

    if !filters.skills.is_empty() {
        // Stored skills keep their original casing; match every common variant.
        builder.push(" AND skills && ");
        builder.push_bind(build_case_variants(filters.skills.iter()));
    }

    if !filters.locations.is_empty() {
        builder.push(" AND location = ANY(");
        builder.push_bind(build_case_variants(filters.locations.iter()));
        builder.push(")");
    }

    if let Some(availability) = &filters.availability {
        builder.push(" AND availability = ");
        builder.push_bind(availability.clone());
    }

    if let Some(min) = filters.min_experience {
        builder.push(" AND years_experience >= ");
        builder.push_bind(min);
    }
    if let Some(max) = filters.max_experience {
        builder.push(" AND years_experience <= ");
        builder.push_bind(max);
    }

    if let Some(min) = filters.min_salary {
        builder.push(" AND expected_salary >= ");
        builder.push_bind(min);
    }
    if let Some(max) = filters.max_salary {
        builder.push(" AND expected_salary <= ");
        builder.push_bind(max);
    }

    if let Some(max_notice) = filters.max_notice_period_days {
        builder.push(" AND notice_period_days <= ");
        builder.push_bind(max_notice);
    }

    if !filters.degree_levels.is_empty() {
        let tokens: Vec<String> = filters
            .degree_levels
            .iter()
            .map(|d| d.as_token().to_string())
            .collect();
        builder.push(" AND highest_degree_level = ANY(");
        builder.push_bind(tokens);
        builder.push(")");
    }

    if !filters.fields_of_study.is_empty() {
        // Filter inputs go through the same normalizer as stored profiles,
        // so "Comp Sci" matches rows stored as "computer_science".
        let normalized: Vec<String> = filters
            .fields_of_study
            .iter()
            .filter_map(|f| normalize_field_of_study(f))
            .collect();
        if !normalized.is_empty() {
            builder.push(" AND normalized_field_of_study = ANY(");
            builder.push_bind(normalized);
            builder.push(")");
        }
    }

    if let Some(min_year) = filters.graduation_year_min {
        builder.push(" AND graduation_year >= ");
        builder.push_bind(min_year);
    }
    if let Some(max_year) = filters.graduation_year_max {
        builder.push(" AND graduation_year <= ");
        builder.push_bind(max_year);
    }

    if !filters.experience_bands.is_empty() {
        let tokens: Vec<String> = filters
            .experience_bands
            .iter()
            .map(|b| b.as_token().to_string())
            .collect();
        builder.push(" AND experience_band = ANY(");
        builder.push_bind(tokens);
        builder.push(")");
    }
}

fn order_clause(sort: SortKey) -> &'static str {
    match sort {
        // Relevance falls back to recency until a real text-rank exists.
        SortKey::Relevance | SortKey::CreatedDesc => " ORDER BY created_at DESC, id",
        SortKey::ExperienceDesc => {
            " ORDER BY years_experience DESC NULLS LAST, created_at DESC, id"
        }
    }
}

#[async_trait]
impl CandidatePool for PgStore {
    async fn search(
        &self,
        filters: &SearchFilters,
    ) -> Result<(Vec<CandidateProfile>, i64), AppError> {
        let mut count_builder =
            QueryBuilder::new("SELECT COUNT(*) FROM candidates WHERE is_visible = TRUE");
        push_filters(&mut count_builder, filters);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.db)
            .await?;

        let mut builder = QueryBuilder::new("SELECT * FROM candidates WHERE is_visible = TRUE");
        push_filters(&mut builder, filters);
        builder.push(order_clause(filters.sort));
        builder.push(" LIMIT ");
        builder.push_bind(filters.limit() as i64);
        builder.push(" OFFSET ");
        builder.push_bind(filters.offset());

        let rows: Vec<CandidateRow> = builder
            .build_query_as::<CandidateRow>()
            .fetch_all(&self.db)
            .await?;

        Ok((rows.into_iter().map(CandidateProfile::from).collect(), total))
    }

    async fn page_ids(&self, offset: i64, limit: i64) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM candidates ORDER BY created_at, id OFFSET $1 LIMIT $2",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(ids)
    }
}

#[async_trait]
impl UnlockLedger for PgStore {
    async fn unlocked_subset(
        &self,
        recruiter_id: Uuid,
        candidate_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, AppError> {
        if candidate_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let unlocked = sqlx::query_scalar::<_, Uuid>(
            "SELECT candidate_id FROM candidate_unlocks
             WHERE recruiter_id = $1 AND candidate_id = ANY($2)",
        )
        .bind(recruiter_id)
        .bind(candidate_ids)
        .fetch_all(&self.db)
        .await?;
        Ok(unlocked.into_iter().collect())
    }
}

#[async_trait]
impl ResumeSections for PgStore {
    async fn sections_for(&self, candidate_id: Uuid) -> Result<ResumeSnapshot, AppError> {
        let education: Vec<EducationEntry> = sqlx::query_as(
            "SELECT degree, field_of_study, institution, end_date
             FROM resume_education WHERE candidate_id = $1 ORDER BY ordinal",
        )
        .bind(candidate_id)
        .fetch_all(&self.db)
        .await?;

        let experience: Vec<ExperienceEntry> = sqlx::query_as(
            r#"SELECT "position", company, start_date, end_date
             FROM resume_experience WHERE candidate_id = $1 ORDER BY ordinal"#,
        )
        .bind(candidate_id)
        .fetch_all(&self.db)
        .await?;

        let projects: Vec<ProjectEntry> = sqlx::query_as(
            "SELECT name, description FROM resume_projects WHERE candidate_id = $1",
        )
        .bind(candidate_id)
        .fetch_all(&self.db)
        .await?;

        let certifications: Vec<CertificationEntry> = sqlx::query_as(
            "SELECT name, issuer FROM resume_certifications WHERE candidate_id = $1",
        )
        .bind(candidate_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ResumeSnapshot {
            education,
            experience,
            projects,
            certifications,
        })
    }
}

#[async_trait]
impl ProfileSink for PgStore {
    async fn write_profile(
        &self,
        candidate_id: Uuid,
        education: &EducationProfile,
        indicators: &ExperienceIndicators,
        years_experience: Option<i32>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE candidates SET
                highest_degree_level = $2,
                primary_field_of_study = $3,
                normalized_field_of_study = $4,
                graduation_date = $5,
                graduation_year = $6,
                internship_count = $7,
                project_count = $8,
                freelance_count = $9,
                training_flag = $10,
                experience_band = $11,
                years_experience = $12
             WHERE id = $1",
        )
        .bind(candidate_id)
        .bind(education.highest_degree_level.map(|d| d.as_token()))
        .bind(&education.primary_field_of_study)
        .bind(&education.normalized_field_of_study)
        .bind(education.graduation_date)
        .bind(education.graduation_year)
        .bind(indicators.internship_count as i32)
        .bind(indicators.project_count as i32)
        .bind(indicators.freelance_count as i32)
        .bind(indicators.training_flag)
        .bind(indicators.experience_band.map(|b| b.as_token()))
        .bind(years_experience)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
