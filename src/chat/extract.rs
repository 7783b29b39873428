// ABOUTME: Extracts the user-facing message from a raw chat backend answer
// ABOUTME: Finds an embedded JSON object and reads response_for_user, falling back to raw text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use serde_json::Value;

use crate::constants::chat::RESPONSE_FOR_USER_FIELD;

/// Extract the text to display from a raw backend answer
///
/// The backend is asked for a JSON object but may wrap it in prose or markdown
/// fences. The candidate object spans the first `{` to the last `}`:
///
/// - candidate parses and has a string `response_for_user`: that value, trimmed
/// - candidate does not parse, or lacks the field: the candidate itself
/// - no `{ ... }` pair: the raw input, trimmed
///
/// Never fails.
///
/// ```
/// use wellness_coach::chat::extract_display_text;
///
/// let raw = r#"Sure! {"analysis_json":{},"response_for_user":"You walked 8000 steps."} Hope that helps."#;
/// assert_eq!(extract_display_text(raw), "You walked 8000 steps.");
/// assert_eq!(extract_display_text("  Hello there  "), "Hello there");
/// assert_eq!(extract_display_text("{not valid json}"), "{not valid json}");
/// ```
#[must_use]
pub fn extract_display_text(raw: &str) -> String {
    let Some(candidate) = embedded_object(raw) else {
        return raw.trim().to_owned();
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => value
            .get(RESPONSE_FOR_USER_FIELD)
            .and_then(Value::as_str)
            .map_or_else(|| candidate.to_owned(), |text| text.trim().to_owned()),
        Err(_) => candidate.to_owned(),
    }
}

/// Slice from the first `{` through the last `}`, if they appear in that order
fn embedded_object(raw: &str) -> Option<&str> {
    let open = raw.find('{')?;
    let close = raw.rfind('}')?;
    (close > open).then(|| &raw[open..=close])
}
