//! Fallback parser chain for model-produced JSON.

use crate::patterns::{code_fence, line_comment, missing_comma, trailing_comma};
use serde_json::{Map, Value};
use simplechat_error::{JsonError, JsonErrorKind};
use tracing::debug;

/// Returns the body of the first fenced block, or `text` unchanged.
///
/// # Examples
///
/// ```
/// use simplechat_json::strip_code_fence;
///
/// let text = "Sure!\n```json\n{\"a\": 1}\n```";
/// assert_eq!(strip_code_fence(text).unwrap(), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("{\"a\": 1}").unwrap(), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(text: &str) -> Result<&str, JsonError> {
    Ok(code_fence()?
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text))
}

/// Strict parse.
pub fn parse_strict(text: &str) -> Result<Value, JsonError> {
    serde_json::from_str(text).map_err(|e| JsonError::new(JsonErrorKind::Parse(e.to_string())))
}

/// Removes commas that directly precede `}` or `]`.
pub fn repair_trailing_commas(text: &str) -> Result<String, JsonError> {
    Ok(trailing_comma()?.replace_all(text, "$1").into_owned())
}

/// Parses the span from the first `{` to the last `}`.
pub fn parse_outermost_object(text: &str) -> Result<Value, JsonError> {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => parse_strict(&text[start..=end]),
        _ => Err(JsonError::new(JsonErrorKind::Parse(
            "no {...} block found".to_string(),
        ))),
    }
}

/// Tries strict parsing, then trailing-comma repair, then the outermost
/// `{...}` of the repaired text.
///
/// # Errors
///
/// Returns [`JsonErrorKind::Parse`] when every attempt fails.
pub fn parse_lenient(text: &str) -> Result<Value, JsonError> {
    let strict_err = match parse_strict(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let repaired = repair_trailing_commas(text)?;
    if let Ok(value) = parse_strict(&repaired) {
        debug!("Parsed JSON after removing trailing commas");
        return Ok(value);
    }

    match parse_outermost_object(&repaired) {
        Ok(value) => {
            debug!("Parsed JSON from outermost object span");
            Ok(value)
        }
        Err(_) => Err(strict_err),
    }
}

/// Strips an optional code fence, then parses leniently.
pub fn parse_input(text: &str, strip_fence: bool) -> Result<Value, JsonError> {
    let raw = if strip_fence {
        strip_code_fence(text)?
    } else {
        text
    };
    parse_lenient(raw)
}

/// Parses leniently and requires an object at top level.
///
/// # Errors
///
/// [`JsonErrorKind::Parse`] when parsing fails, [`JsonErrorKind::NotAnObject`]
/// for any other top-level value.
///
/// # Examples
///
/// ```
/// use simplechat_json::parse_object;
///
/// let object = parse_object("{\"tags\": [\"a\", \"b\",],}").unwrap();
/// assert_eq!(object["tags"][1], "b");
/// assert!(parse_object("[1, 2]").is_err());
/// ```
pub fn parse_object(text: &str) -> Result<Map<String, Value>, JsonError> {
    match parse_lenient(text)? {
        Value::Object(object) => Ok(object),
        other => Err(JsonError::new(JsonErrorKind::NotAnObject(
            type_name(&other).to_string(),
        ))),
    }
}

/// Returns the first brace-balanced `{...}` span, ignoring braces inside
/// single- or double-quoted strings.
///
/// # Examples
///
/// ```
/// use simplechat_json::first_balanced_object;
///
/// let text = "note {\"a\": \"}\"} and {\"b\": 2}";
/// assert_eq!(first_balanced_object(text), Some("{\"a\": \"}\"}"));
/// assert_eq!(first_balanced_object("{\"open\": 1"), None);
/// ```
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let text = text.trim_start_matches('\u{feff}').trim();
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn repair_hand_edits(text: &str) -> Result<String, JsonError> {
    let repaired = repair_trailing_commas(text)?;
    let repaired = missing_comma()?.replace_all(&repaired, "${1},\n${2}");
    Ok(line_comment()?.replace_all(&repaired, "").trim().to_string())
}

/// Parses JSON that a person may have edited by hand.
///
/// Whole-line `//` and `#` comments are dropped. The text and then its first
/// balanced object are each tried strictly, then after repairing trailing
/// commas and commas missing between lines.
///
/// # Errors
///
/// Returns the last [`JsonErrorKind::Parse`] error when every candidate fails.
///
/// # Examples
///
/// ```
/// use simplechat_json::parse_annotated;
///
/// let text = "// base prompt\n{\n  \"artist\": \"@a\"\n  \"tags\": \"solo\",\n}";
/// let value = parse_annotated(text).unwrap();
/// assert_eq!(value["tags"], "solo");
/// ```
pub fn parse_annotated(text: &str) -> Result<Value, JsonError> {
    let cleaned = text.trim_start_matches('\u{feff}');
    let cleaned = line_comment()?.replace_all(cleaned, "");
    let cleaned = cleaned.trim();

    let mut candidates = vec![cleaned];
    if let Some(object) = first_balanced_object(cleaned) {
        if object != cleaned {
            candidates.push(object);
        }
    }

    let mut last_err = None;
    for candidate in candidates {
        match parse_strict(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => last_err = Some(e),
        }
        match parse_strict(&repair_hand_edits(candidate)?) {
            Ok(value) => {
                debug!("Parsed hand-edited JSON after repairs");
                return Ok(value);
            }
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err
        .unwrap_or_else(|| JsonError::new(JsonErrorKind::Parse("empty input".to_string()))))
}

/// Short name of a JSON value's type.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
