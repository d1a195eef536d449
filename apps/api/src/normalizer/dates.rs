//! Permissive date parsing for resume date strings.
//!
//! Resumes carry everything from ISO dates to "May 2020" to bare years.
//! Parsing failures degrade to `None`; callers fall back to bare-year
//! extraction so a candidate with messy dates is still scoreable.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

const FULL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b",
    )
    .unwrap()
});

static NUMERIC_MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})[-/](\d{1,2})\b|\b(\d{1,2})[-/](\d{4})\b").unwrap());

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

/// Parses a date string permissively. Partial dates resolve to the first
/// day of the month or year. Returns `None` when nothing date-like is
/// present.
pub fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    if let Some(caps) = MONTH_YEAR_RE.captures(trimmed) {
        let month = month_number(&caps[1]);
        if let Ok(year) = caps[2].parse::<i32>() {
            return NaiveDate::from_ymd_opt(year, month, 1);
        }
    }

    if let Some(caps) = NUMERIC_MONTH_YEAR_RE.captures(trimmed) {
        let (year, month) = match (caps.get(1), caps.get(3)) {
            (Some(y), _) => (y.as_str(), &caps[2]),
            (None, Some(m)) => (&caps[4], m.as_str()),
            _ => return None,
        };
        if let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>()) {
            if (1..=12).contains(&month) {
                return NaiveDate::from_ymd_opt(year, month, 1);
            }
        }
    }

    None
}

/// Extracts a plausible 4-digit year (19xx/20xx) from raw text. The last
/// resort when full date parsing fails.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<i32>().ok())
}

fn month_number(prefix: &str) -> u32 {
    match prefix.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        _ => 12,
    }
}
