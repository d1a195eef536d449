//! Field-of-study normalization.
//!
//! Two candidates who wrote "CS" and "Computer Science" must normalize to
//! the same canonical token. Unrecognized fields are slugified rather than
//! discarded so every candidate with a field gets *some* canonical value.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Synonym table keyed by the cleaned (lowercase, alphanumeric+space) form.
static FIELD_SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    // computer_science
    for k in ["cs", "comp sci", "computer science", "computer sciences", "computing"] {
        m.insert(k, "computer_science");
    }
    // software_engineering
    for k in ["software engineering", "software development"] {
        m.insert(k, "software_engineering");
    }
    // information_technology
    for k in ["it", "information technology", "infotech"] {
        m.insert(k, "information_technology");
    }
    // information_systems
    for k in ["information systems", "mis", "management information systems"] {
        m.insert(k, "information_systems");
    }
    // data_science
    for k in ["data science", "data analytics"] {
        m.insert(k, "data_science");
    }
    // artificial_intelligence
    for k in ["ai", "artificial intelligence", "machine learning", "ml"] {
        m.insert(k, "artificial_intelligence");
    }
    // engineering disciplines
    for k in ["ee", "electrical engineering", "electrical and electronic engineering"] {
        m.insert(k, "electrical_engineering");
    }
    m.insert("mechanical engineering", "mechanical_engineering");
    m.insert("civil engineering", "civil_engineering");
    // mathematics / statistics / physics
    for k in ["math", "maths", "mathematics", "applied mathematics"] {
        m.insert(k, "mathematics");
    }
    for k in ["stats", "statistics"] {
        m.insert(k, "statistics");
    }
    m.insert("physics", "physics");
    // business and adjacent
    for k in ["business admin", "business administration", "bba"] {
        m.insert(k, "business_administration");
    }
    for k in ["accounting", "accountancy"] {
        m.insert(k, "accounting");
    }
    m.insert("finance", "finance");
    for k in ["econ", "economics"] {
        m.insert(k, "economics");
    }
    m.insert("marketing", "marketing");
    for k in ["hr", "human resources", "human resource management"] {
        m.insert(k, "human_resources");
    }
    m.insert("graphic design", "graphic_design");
    m
});

/// Normalizes a free-text field of study into a canonical lowercase
/// snake_case token. Returns `None` only when the cleaned text is empty;
/// unknown fields fall back to a slug of the cleaned text.
pub fn normalize_field_of_study(text: &str) -> Option<String> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return None;
    }
    if let Some(canonical) = FIELD_SYNONYMS.get(cleaned.as_str()) {
        return Some((*canonical).to_string());
    }
    Some(cleaned.replace(' ', "_"))
}

/// Lowercases, strips non-alphanumerics, and collapses whitespace.
fn clean(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}
