//! Bounded extraction of the first balanced JSON object from free-form
//! model output.
//!
//! A small single-pass scanner rather than a regex: tracks brace depth and
//! string/escape state so adversarial input cannot trigger catastrophic
//! backtracking.

use serde_json::Value;

/// Returns the first balanced `{...}` span in the text, if any.
pub fn first_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|&b| b == b'{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts and strictly parses the first balanced JSON object.
pub fn parse_first_json_object(text: &str) -> Option<Value> {
    let span = first_json_object(text)?;
    serde_json::from_str(span).ok()
}
