//! Education & experience normalizer.
//!
//! Converts raw resume fragments (free-text degree names, date strings,
//! position/company text) into the canonical `EducationProfile` and
//! `ExperienceIndicators`. All pattern cascades are ordered lists evaluated
//! in fixed sequence; first match wins.

pub mod backfill;
pub mod dates;
pub mod degree;
pub mod education;
pub mod experience;
pub mod field;

pub use degree::infer_degree_level;
pub use education::derive_education_profile;
pub use experience::{derive_experience_indicators, derive_years_experience};
pub use field::normalize_field_of_study;
