//! Tolerant JSON recovery for LLM output.
//!
//! Providers do not reliably emit strict JSON: responses arrive wrapped in
//! markdown fences, carry trailing commas, or contain one malformed element
//! in an otherwise-good array. `parse` runs an ordered fallback chain —
//! strict parse, de-fence + comma cleanup, per-element array recovery,
//! single-object recovery — and fails only when no stage yields a value.

use serde_json::Value;
use thiserror::Error;

/// How much of the cleaned text a `ParseError` carries for diagnostics.
const SNIPPET_LEN: usize = 300;

/// No JSON object or array could be extracted from the text.
///
/// Always recoverable by the caller (retry the upstream call, switch
/// provider); never a substitute for an empty-but-valid collection.
#[derive(Debug, Error)]
#[error("no parseable JSON in model output: {snippet}")]
pub struct ParseError {
    /// First 300 characters of the text as it looked after cleanup.
    pub snippet: String,
}

impl ParseError {
    fn new(cleaned: &str) -> Self {
        Self {
            snippet: cleaned.chars().take(SNIPPET_LEN).collect(),
        }
    }
}

/// Extracts a JSON value from raw LLM text, repairing cosmetic defects.
///
/// Well-formed input parses strictly and is returned byte-for-byte
/// equivalent to `serde_json::from_str`. Degraded input goes through the
/// fallback chain; a malformed element inside an array is dropped rather
/// than sinking the whole batch.
pub fn parse(raw: &str) -> Result<Value, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(trimmed));
    }

    // Fast path. Also guarantees idempotence for valid JSON whose string
    // content happens to contain fence markers or ",}" sequences.
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let cleaned = strip_trailing_commas(strip_fences(trimmed));

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    if cleaned.trim_start().starts_with('[') {
        // Zero recoveries must fail loudly, not return an empty array.
        let objects = recover_array_objects(&cleaned);
        if !objects.is_empty() {
            return Ok(Value::Array(objects));
        }
    } else if let Some(start) = cleaned.find('{') {
        if let Some(object) = recover_single_object(&cleaned, start) {
            return Ok(object);
        }
    }

    Err(ParseError::new(&cleaned))
}

/// Isolates the payload of the first markdown code fence.
///
/// A `` ```json `` opener is preferred over a bare `` ``` ``; the closer is
/// always the bare marker. With no closer (truncated output) everything
/// after the opener is kept.
fn strip_fences(text: &str) -> &str {
    for fence in ["```json", "```"] {
        if let Some(open) = text.find(fence) {
            let after = &text[open + fence.len()..];
            return match after.find("```") {
                Some(close) => after[..close].trim(),
                None => after.trim(),
            };
        }
    }
    text
}

/// Deletes commas that sit (modulo whitespace) before a closing `]` or `}`.
///
/// Scoped exactly to that pattern, and skipped inside string literals so a
/// legitimate `",}"` in content survives.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => match text[i + 1..].trim_start().chars().next() {
                Some(']') | Some('}') => {}
                _ => out.push(c),
            },
            _ => out.push(c),
        }
    }
    out
}

/// Brace-depth scan over an intended array: every balanced top-level
/// `{...}` span is comma-fixed and parsed on its own; spans that still fail
/// are dropped silently. Quoted strings (with escapes) never affect depth.
fn recover_array_objects(text: &str) -> Vec<Value> {
    let mut objects = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        if let Some(s) = start.take() {
                            let chunk = strip_trailing_commas(&text[s..i + 1]);
                            if let Ok(value) = serde_json::from_str::<Value>(&chunk) {
                                objects.push(value);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    objects
}

/// Slices out the first balanced `{...}` span starting at `start` and
/// parses it. Only one object is expected, so the scan stops at the first
/// complete span whether or not it parses.
fn recover_single_object(text: &str, start: usize) -> Option<Value> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let chunk = strip_trailing_commas(&text[start..start + i + 1]);
                    return serde_json::from_str::<Value>(&chunk).ok();
                }
            }
            _ => {}
        }
    }
    None
}

/// Counts top-level `{...}` spans in text meant to be an array. Used by the
/// LLM client to log how many elements a lossy recovery dropped.
pub fn top_level_object_count(text: &str) -> usize {
    let mut count = 0usize;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for c in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        count += 1;
                    }
                }
            }
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_object_parses_identically() {
        let s = r#"{"a": 1, "b": [1, 2], "c": {"d": "e"}}"#;
        assert_eq!(parse(s).unwrap(), serde_json::from_str::<Value>(s).unwrap());
    }

    #[test]
    fn test_valid_array_parses_identically() {
        let s = r#"[{"a": 1}, {"b": 2}]"#;
        assert_eq!(parse(s).unwrap(), serde_json::from_str::<Value>(s).unwrap());
    }

    #[test]
    fn test_valid_json_with_fence_marker_in_string_is_untouched() {
        let s = r#"{"snippet": "```json\nnot a fence\n```"}"#;
        assert_eq!(parse(s).unwrap(), serde_json::from_str::<Value>(s).unwrap());
    }

    #[test]
    fn test_valid_json_with_comma_closer_in_string_is_untouched() {
        let s = r#"{"weird": ",}", "ok": true}"#;
        assert_eq!(parse(s).unwrap(), serde_json::from_str::<Value>(s).unwrap());
    }

    #[test]
    fn test_fenced_json_block() {
        let out = parse("```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn test_fenced_block_without_language_tag() {
        let out = parse("```\n[{\"a\":1}]\n```").unwrap();
        assert_eq!(out, json!([{"a": 1}]));
    }

    #[test]
    fn test_truncated_fence_takes_remainder() {
        let out = parse("Here you go:\n```json\n{\"a\": 1}").unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn test_prose_before_fence_is_discarded() {
        let out = parse("Sure! The answer is below.\n```json\n{\"q\": \"x\"}\n```\nHope that helps.")
            .unwrap();
        assert_eq!(out, json!({"q": "x"}));
    }

    #[test]
    fn test_trailing_commas_removed() {
        let out = parse(r#"{"a":1, "b":[1,2,],}"#).unwrap();
        assert_eq!(out, json!({"a": 1, "b": [1, 2]}));
    }

    #[test]
    fn test_trailing_comma_with_newline_before_closer() {
        let out = parse("{\"a\": 1,\n  \"b\": 2,\n}").unwrap();
        assert_eq!(out, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_partial_array_recovery_drops_bad_element() {
        let out = parse(r#"[{"a":1},{BROKEN},{"a":2}]"#).unwrap();
        assert_eq!(out, json!([{"a": 1}, {"a": 2}]));
    }

    #[test]
    fn test_array_recovery_fixes_per_element_commas() {
        let out = parse(r#"[{"a":1,},{"b":2,}] trailing garbage"#).unwrap();
        assert_eq!(out, json!([{"a": 1}, {"b": 2}]));
    }

    #[test]
    fn test_array_with_zero_valid_objects_errors() {
        let err = parse("[{nope}, {also nope}]").unwrap_err();
        assert!(err.snippet.contains("nope"));
    }

    #[test]
    fn test_single_object_surrounded_by_prose() {
        let out = parse(r#"Here is the result: {"x": 5} Thanks!"#).unwrap();
        assert_eq!(out, json!({"x": 5}));
    }

    #[test]
    fn test_single_object_recovery_handles_nesting() {
        let out = parse(r#"result: {"a": {"b": {"c": 1}}} done"#).unwrap();
        assert_eq!(out, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn test_brace_inside_string_does_not_end_scan() {
        let out = parse(r#"answer: {"q": "what does { mean?", "n": 1} bye"#).unwrap();
        assert_eq!(out, json!({"q": "what does { mean?", "n": 1}));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let out = parse(r#"x {"q": "she said \"hi{\"", "n": 2} y"#).unwrap();
        assert_eq!(out, json!({"q": "she said \"hi{\"", "n": 2}));
    }

    #[test]
    fn test_array_element_with_brace_in_string() {
        let out = parse(r#"[{"q":"print {}"},{BAD},{"q":"ok"}]"#).unwrap();
        assert_eq!(out, json!([{"q": "print {}"}, {"q": "ok"}]));
    }

    #[test]
    fn test_empty_string_errors() {
        assert!(parse("").is_err());
        assert!(parse("   \n\t ").is_err());
    }

    #[test]
    fn test_plain_prose_errors() {
        let err = parse("not json at all").unwrap_err();
        assert_eq!(err.snippet, "not json at all");
    }

    #[test]
    fn test_error_snippet_is_truncated() {
        let long = "x".repeat(1000);
        let err = parse(&long).unwrap_err();
        assert_eq!(err.snippet.len(), 300);
    }

    #[test]
    fn test_literal_empty_collections_still_parse() {
        assert_eq!(parse("{}").unwrap(), json!({}));
        assert_eq!(parse("[]").unwrap(), json!([]));
    }

    #[test]
    fn test_end_to_end_fenced_array_with_trailing_commas() {
        let raw = "```json\n[{\"q\":\"Q1\",\"options\":[\"A\",\"B\"],},{\"q\":\"Q2\"}]\n```";
        let out = parse(raw).unwrap();
        assert_eq!(
            out,
            json!([{"q": "Q1", "options": ["A", "B"]}, {"q": "Q2"}])
        );
    }

    #[test]
    fn test_top_level_object_count() {
        assert_eq!(top_level_object_count(r#"[{"a":1},{BAD},{"b":2}]"#), 3);
        assert_eq!(top_level_object_count(r#"[{"a":{"b":1}}]"#), 1);
        assert_eq!(top_level_object_count(r#"["{not an object}"]"#), 0);
        assert_eq!(top_level_object_count("[]"), 0);
    }

    #[test]
    fn test_strip_trailing_commas_preserves_string_content() {
        assert_eq!(
            strip_trailing_commas(r#"{"a": ",}", "b": 1,}"#),
            r#"{"a": ",}", "b": 1}"#
        );
    }

    #[test]
    fn test_strip_fences_prefers_json_tag() {
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fences("no fences"), "no fences");
    }
}
