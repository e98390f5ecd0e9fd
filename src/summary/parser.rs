//! Parsing raw model output into a [`Summary`].

use super::Summary;
use crate::error::{Result, TldwError};
use serde_json::Value;
use std::borrow::Cow;

const FENCE: &str = "```";

/// Parse model output, tolerating a surrounding markdown code fence.
///
/// Missing fields fall back to empty values; anything that is not a JSON
/// object of the expected shape is a [`TldwError::Parse`].
pub fn parse_summary(raw: &str) -> Result<Summary> {
    let text = strip_fences(raw);
    let parse_error = |e: &dyn std::fmt::Display| {
        TldwError::Parse(format!("{}. Response was: {}", e, preview(raw, 500)))
    };

    let value: Value = serde_json::from_str(&text).map_err(|e| parse_error(&e))?;
    check_shape(&value).map_err(|e| parse_error(&e))?;
    serde_json::from_value(value).map_err(|e| parse_error(&e))
}

/// Serde reads structs from arrays by position; only objects are accepted here.
fn check_shape(value: &Value) -> std::result::Result<(), &'static str> {
    let Value::Object(map) = value else {
        return Err("expected a JSON object");
    };
    if let Some(Value::Array(sections)) = map.get("sections") {
        if !sections.iter().all(Value::is_object) {
            return Err("expected every section to be a JSON object");
        }
    }
    Ok(())
}

/// Drop an opening fence line and, if present, a closing fence line.
fn strip_fences(raw: &str) -> Cow<'_, str> {
    let text = raw.trim();
    if !text.starts_with(FENCE) {
        return Cow::Borrowed(text);
    }

    let mut lines: Vec<&str> = text.split('\n').skip(1).collect();
    if lines.last().is_some_and(|l| l.trim() == FENCE) {
        lines.pop();
    }
    Cow::Owned(lines.join("\n"))
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
  "one_liner": "a chill video",
  "sections": [
    {"title": "Intro", "summary": "It starts.", "quote": "hello world", "timestamp_hint": "start"}
  ]
}"#;

    #[test]
    fn test_plain_json() {
        let summary = parse_summary(RAW).unwrap();
        assert_eq!(summary.one_liner, "a chill video");
        assert_eq!(summary.sections.len(), 1);
        assert_eq!(summary.sections[0].quote, "hello world");
    }

    #[test]
    fn test_fenced_variants_match_plain() {
        let plain = parse_summary(RAW).unwrap();
        let json_fence = parse_summary(&format!("```json\n{}\n```", RAW)).unwrap();
        let bare_fence = parse_summary(&format!("```\n{}\n```", RAW)).unwrap();
        assert_eq!(plain, json_fence);
        assert_eq!(plain, bare_fence);
    }

    #[test]
    fn test_fence_without_closing_marker() {
        let summary = parse_summary(&format!("```json\n{}", RAW)).unwrap();
        assert_eq!(summary.one_liner, "a chill video");
    }

    #[test]
    fn test_surrounding_whitespace() {
        let summary = parse_summary(&format!("\n\n  ```json\n{}\n```  \n", RAW)).unwrap();
        assert_eq!(summary.sections[0].title, "Intro");
    }

    #[test]
    fn test_missing_fields_default() {
        let summary = parse_summary(r#"{"sections": [{"title": "Only a title"}]}"#).unwrap();
        assert_eq!(summary.one_liner, "");
        assert_eq!(summary.sections[0].quote, "");
        assert_eq!(summary.sections[0].timestamp_hint, "");

        let empty = parse_summary("{}").unwrap();
        assert!(empty.sections.is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(parse_summary("not json at all"), Err(TldwError::Parse(_))));
        assert!(matches!(parse_summary("[1, 2, 3]"), Err(TldwError::Parse(_))));
        assert!(matches!(parse_summary(""), Err(TldwError::Parse(_))));
    }

    #[test]
    fn test_positional_array_is_rejected() {
        let raw = r#"["a chill video", [["Intro", "s", "hello world", "start"]]]"#;
        assert!(matches!(parse_summary(raw), Err(TldwError::Parse(_))));
        assert!(matches!(parse_summary("\"just text\""), Err(TldwError::Parse(_))));

        let nested = r#"{"one_liner": "x", "sections": [["Intro", "s", "hello world", "start"]]}"#;
        assert!(matches!(parse_summary(nested), Err(TldwError::Parse(_))));
    }
}
