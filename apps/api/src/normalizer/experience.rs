//! Experience indicators: entry classification, the years-of-experience
//! proxy, and experience-band bucketing.

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::candidate::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry,
};
use crate::models::profile::{ExperienceBand, ExperienceIndicators};
use crate::normalizer::dates::{extract_year, parse_flexible_date};

static INTERN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bintern(?:ship)?\b|\btrainee\b|\bco-?op\b").unwrap());

static FREELANCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bfreelanc(?:e|er|ing)\b|\bcontract(?:or)?\b|\bpart-?time\b|\bconsultant\b")
        .unwrap()
});

static TRAINING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bbootcamp\b|\bnanodegree\b|\btraining\b|\bcourse\b|\bacademy\b|\bprogram(?:me)?\b")
        .unwrap()
});

/// Derives experience indicators from resume sections.
///
/// `years_experience` and `graduation_date` come from the candidate's
/// derived profile; the band falls back to a "graduated within the last
/// 12 months" check when years are unknown.
pub fn derive_experience_indicators(
    experience: &[ExperienceEntry],
    projects: &[ProjectEntry],
    education: &[EducationEntry],
    certifications: &[CertificationEntry],
    years_experience: Option<i32>,
    graduation_date: Option<NaiveDate>,
) -> ExperienceIndicators {
    derive_experience_indicators_at(
        experience,
        projects,
        education,
        certifications,
        years_experience,
        graduation_date,
        Utc::now().date_naive(),
    )
}

pub(crate) fn derive_experience_indicators_at(
    experience: &[ExperienceEntry],
    projects: &[ProjectEntry],
    education: &[EducationEntry],
    certifications: &[CertificationEntry],
    years_experience: Option<i32>,
    graduation_date: Option<NaiveDate>,
    today: NaiveDate,
) -> ExperienceIndicators {
    let mut internship_count = 0;
    let mut freelance_count = 0;

    for entry in experience {
        let text = format!(
            "{} {}",
            entry.position.as_deref().unwrap_or_default(),
            entry.company.as_deref().unwrap_or_default()
        );
        if INTERN_RE.is_match(&text) {
            internship_count += 1;
        }
        if FREELANCE_RE.is_match(&text) {
            freelance_count += 1;
        }
    }

    let training_flag = education.iter().any(|e| {
        e.degree
            .as_deref()
            .map(|d| TRAINING_RE.is_match(d))
            .unwrap_or(false)
            || e.institution
                .as_deref()
                .map(|i| TRAINING_RE.is_match(i))
                .unwrap_or(false)
    }) || certifications.iter().any(|c| TRAINING_RE.is_match(&c.name));

    ExperienceIndicators {
        internship_count,
        project_count: projects.len() as u32,
        freelance_count,
        training_flag,
        experience_band: compute_band(years_experience, graduation_date, today),
    }
}

/// Years of experience proxy: elapsed years from the earliest parseable
/// experience start date, rounded, floored at zero.
///
/// Overlapping concurrent roles are not deduplicated. This is a known
/// rough proxy; changing it would shift match scores across the whole
/// candidate pool.
pub fn derive_years_experience(experience: &[ExperienceEntry]) -> Option<i32> {
    derive_years_experience_at(experience, Utc::now().date_naive())
}

pub(crate) fn derive_years_experience_at(
    experience: &[ExperienceEntry],
    today: NaiveDate,
) -> Option<i32> {
    let earliest = experience
        .iter()
        .filter_map(|e| e.start_date.as_deref())
        .filter_map(|raw| {
            parse_flexible_date(raw)
                .or_else(|| extract_year(raw).and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)))
        })
        .min()?;

    let elapsed_years = (today - earliest).num_days() as f64 / 365.25;
    Some(elapsed_years.round().max(0.0) as i32)
}

fn compute_band(
    years_experience: Option<i32>,
    graduation_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<ExperienceBand> {
    if let Some(years) = years_experience {
        return Some(match years {
            y if y <= 1 => ExperienceBand::StudentFresh,
            y if y <= 3 => ExperienceBand::Junior,
            y if y <= 6 => ExperienceBand::Mid,
            _ => ExperienceBand::Senior,
        });
    }
    let graduated = graduation_date?;
    if months_between(graduated, today) <= 12 {
        Some(ExperienceBand::StudentFresh)
    } else {
        None
    }
}

fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}
