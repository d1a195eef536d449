//! Education profile derivation from raw resume education entries.

use crate::models::candidate::EducationEntry;
use crate::models::profile::EducationProfile;
use crate::normalizer::dates::{extract_year, parse_flexible_date};
use crate::normalizer::degree::infer_degree_level;
use crate::normalizer::field::normalize_field_of_study;

/// Derives the canonical education profile from all education entries.
///
/// Tracks the highest-ranked degree seen (ties keep the earliest-seen
/// field of study) and the most recent parseable graduation date, with a
/// bare-year regex fallback for unparsable date strings.
pub fn derive_education_profile(entries: &[EducationEntry]) -> EducationProfile {
    let mut profile = EducationProfile::default();

    for entry in entries {
        let degree_text = entry.degree.as_deref().unwrap_or_default();
        if let Some(level) = infer_degree_level(degree_text) {
            let is_higher = profile
                .highest_degree_level
                .map_or(true, |current| level > current);
            if is_higher {
                profile.highest_degree_level = Some(level);
                if let Some(field) = entry.field_of_study.as_deref() {
                    if !field.trim().is_empty() {
                        profile.primary_field_of_study = Some(field.trim().to_string());
                        profile.normalized_field_of_study = normalize_field_of_study(field);
                    }
                }
            }
        }

        if let Some(raw_date) = entry.end_date.as_deref() {
            match parse_flexible_date(raw_date) {
                Some(date) => {
                    if profile.graduation_date.map_or(true, |current| date > current) {
                        profile.graduation_date = Some(date);
                    }
                }
                None => {
                    if let Some(year) = extract_year(raw_date) {
                        if profile.graduation_year.map_or(true, |current| year > current) {
                            profile.graduation_year = Some(year);
                        }
                    }
                }
            }
        }
    }

    if let Some(date) = profile.graduation_date {
        use chrono::Datelike;
        profile.graduation_year = Some(date.year());
    }

    // No degree inferred anywhere: still carry the first field seen so the
    // field-of-study checks have something to compare.
    if profile.highest_degree_level.is_none() && profile.normalized_field_of_study.is_none() {
        if let Some(field) = entries
            .iter()
            .filter_map(|e| e.field_of_study.as_deref())
            .find(|f| !f.trim().is_empty())
        {
            profile.primary_field_of_study = Some(field.trim().to_string());
            profile.normalized_field_of_study = normalize_field_of_study(field);
        }
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::DegreeLevel;
    use chrono::NaiveDate;

    fn entry(degree: &str, field: &str, end: &str) -> EducationEntry {
        EducationEntry {
            degree: (!degree.is_empty()).then(|| degree.to_string()),
            field_of_study: (!field.is_empty()).then(|| field.to_string()),
            institution: None,
            end_date: (!end.is_empty()).then(|| end.to_string()),
        }
    }

    #[test]
    fn test_highest_degree_wins() {
        let profile = derive_education_profile(&[
            entry("B.Sc", "Computer Science", "2018"),
            entry("Master of Science", "Data Science", "2020"),
        ]);
        assert_eq!(profile.highest_degree_level, Some(DegreeLevel::Master));
        assert_eq!(
            profile.normalized_field_of_study.as_deref(),
            Some("data_science")
        );
    }

    #[test]
    fn test_equal_rank_keeps_earliest_field() {
        let profile = derive_education_profile(&[
            entry("Bachelor of Science", "Computer Science", "2016"),
            entry("Bachelor of Arts", "Economics", "2019"),
        ]);
        assert_eq!(profile.highest_degree_level, Some(DegreeLevel::Bachelor));
        assert_eq!(
            profile.normalized_field_of_study.as_deref(),
            Some("computer_science")
        );
    }

    #[test]
    fn test_most_recent_graduation_date() {
        let profile = derive_education_profile(&[
            entry("B.Sc", "CS", "May 2016"),
            entry("M.Sc", "CS", "June 2020"),
        ]);
        assert_eq!(
            profile.graduation_date,
            NaiveDate::from_ymd_opt(2020, 6, 1)
        );
        assert_eq!(profile.graduation_year, Some(2020));
    }

    #[test]
    fn test_year_regex_fallback() {
        let profile = derive_education_profile(&[entry("B.Sc", "CS", "spring term 2017 ish")]);
        assert_eq!(profile.graduation_date, None);
        assert_eq!(profile.graduation_year, Some(2017));
    }

    #[test]
    fn test_unparsable_dates_degrade_silently() {
        let profile = derive_education_profile(&[entry("B.Sc", "CS", "present")]);
        assert_eq!(profile.graduation_date, None);
        assert_eq!(profile.graduation_year, None);
        assert_eq!(profile.highest_degree_level, Some(DegreeLevel::Bachelor));
    }

    #[test]
    fn test_field_without_degree_still_normalized() {
        let profile = derive_education_profile(&[entry("", "Computer Science", "")]);
        assert_eq!(profile.highest_degree_level, None);
        assert_eq!(
            profile.normalized_field_of_study.as_deref(),
            Some("computer_science")
        );
    }

    #[test]
    fn test_empty_entries() {
        let profile = derive_education_profile(&[]);
        assert!(!profile.has_data());
    }
}
