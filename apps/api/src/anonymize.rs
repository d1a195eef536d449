//! Identity anonymization for locked candidate profiles.
//!
//! Purely deterministic and stateless: the masked name is recomputed per
//! request rather than stored, so re-applying to the same input must
//! always yield the same output.

/// Masks a candidate's name for recruiters who have not unlocked the
/// profile.
///
/// No name: `"Candidate "` + first 6 chars of the ID. One token:
/// first char + `"***"`. Otherwise: first token + last-token initial + `.`.
pub fn anonymize_name(full_name: Option<&str>, candidate_id: &str) -> String {
    let name = full_name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        let short_id: String = candidate_id.chars().take(6).collect();
        return format!("Candidate {short_id}");
    }

    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.len() == 1 {
        let first_char = tokens[0].chars().next().unwrap_or('?');
        return format!("{first_char}***");
    }

    let last_initial = tokens
        .last()
        .and_then(|t| t.chars().next())
        .unwrap_or('?');
    format!("{} {}.", tokens[0], last_initial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_tokens() {
        assert_eq!(anonymize_name(Some("John Doe"), "abc123xyz"), "John D.");
    }

    #[test]
    fn test_single_token() {
        assert_eq!(anonymize_name(Some("Cher"), "abc123xyz"), "C***");
    }

    #[test]
    fn test_missing_name_uses_id_prefix() {
        assert_eq!(anonymize_name(None, "abc123xyz"), "Candidate abc123");
        assert_eq!(anonymize_name(Some("   "), "abc123xyz"), "Candidate abc123");
    }

    #[test]
    fn test_three_tokens_keeps_first_and_last_initial() {
        assert_eq!(
            anonymize_name(Some("Ana Maria Silva"), "id"),
            "Ana S."
        );
    }

    #[test]
    fn test_deterministic() {
        let a = anonymize_name(Some("John Doe"), "abc");
        let b = anonymize_name(Some("John Doe"), "abc");
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(anonymize_name(None, "ab"), "Candidate ab");
    }
}
