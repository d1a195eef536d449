//! Lexical utilities shared by the normalizer, analyzer, and scorer.
//!
//! Everything here is pure and deterministic. `tokenize` is the single
//! tokenizer used on both JD text and candidate text so the two sides
//! produce comparable tokens.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Generic filler words dropped during tokenization. Articles, pronouns,
/// and job-posting boilerplate that carries no matching signal.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "for", "nor", "with", "without", "from", "into",
        "onto", "of", "in", "on", "at", "by", "to", "as", "is", "are", "was", "were", "be",
        "been", "being", "will", "would", "can", "could", "should", "shall", "may", "might",
        "have", "has", "had", "do", "does", "did", "not", "no", "yes", "you", "your", "yours",
        "we", "our", "ours", "us", "they", "their", "them", "he", "she", "his", "her", "it",
        "its", "this", "that", "these", "those", "who", "whom", "what", "which", "when",
        "where", "how", "why", "all", "any", "some", "more", "most", "other", "such", "than",
        "then", "also", "about", "role", "roles", "team", "teams", "job", "jobs", "work",
        "working", "company", "position", "candidate", "candidates", "experience",
        "experienced", "skills", "skill", "strong", "ability", "able", "looking", "join",
        "opportunity", "years", "year", "plus", "etc", "new", "well", "must", "need", "needs",
        "required", "requirements", "responsibilities", "preferred",
    ]
    .into_iter()
    .collect()
});

/// Lower-cases, strips punctuation except `+ # . -`, splits on whitespace,
/// and drops single-character tokens and stop words.
///
/// Order-preserving and NOT deduplicated; callers that need set semantics
/// collect into a set themselves.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '-') {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .map(|t| t.trim_matches(|c| matches!(c, '.' | '-')))
        .filter(|t| t.chars().count() > 1)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Trims, drops empties, and deduplicates while preserving first-seen order.
pub fn unique_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for v in values {
        let trimmed = v.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// For each value, generates {original, lowercase, UPPERCASE, Title Case}.
///
/// Used when building exact-match filters against a store that cannot do
/// case-insensitive set membership, so case-inconsistent stored values
/// still match.
pub fn build_case_variants<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for v in values {
        let original = v.as_ref().trim();
        if original.is_empty() {
            continue;
        }
        for variant in [
            original.to_string(),
            original.to_lowercase(),
            original.to_uppercase(),
            title_case(original),
        ] {
            if seen.insert(variant.clone()) {
                out.push(variant);
            }
        }
    }
    out
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens = tokenize("Senior Rust Engineer, Python & SQL!");
        assert_eq!(tokens, vec!["senior", "rust", "engineer", "python", "sql"]);
    }

    #[test]
    fn test_tokenize_keeps_tech_punctuation() {
        let tokens = tokenize("C++ and C# with node.js");
        assert_eq!(tokens, vec!["c++", "c#", "node.js"]);
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        let tokens = tokenize("We are looking for a candidate to join the team");
        assert!(tokens.is_empty(), "got {tokens:?}");
    }

    #[test]
    fn test_tokenize_preserves_order_and_duplicates() {
        let tokens = tokenize("python sql python");
        assert_eq!(tokens, vec!["python", "sql", "python"]);
    }

    #[test]
    fn test_unique_list_trims_and_dedupes() {
        let out = unique_list(["  rust ", "sql", "", "rust", "  "]);
        assert_eq!(out, vec!["rust", "sql"]);
    }

    #[test]
    fn test_case_variants_cover_four_forms() {
        let out = build_case_variants(["rUsT"]);
        assert!(out.contains(&"rUsT".to_string()));
        assert!(out.contains(&"rust".to_string()));
        assert!(out.contains(&"RUST".to_string()));
        assert!(out.contains(&"Rust".to_string()));
    }

    #[test]
    fn test_case_variants_dedupe_across_inputs() {
        let out = build_case_variants(["sql", "SQL"]);
        // "sql" variants already cover "SQL"'s lowercase/upper forms
        assert_eq!(
            out.iter().filter(|v| v.to_lowercase() == "sql").count(),
            out.len()
        );
        assert!(out.contains(&"Sql".to_string()));
    }

    #[test]
    fn test_title_case_multi_word() {
        assert_eq!(title_case("machine learning"), "Machine Learning");
    }
}
