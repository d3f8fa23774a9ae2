//! Compiled repair patterns.

use regex::{Regex, RegexBuilder};
use simplechat_error::{JsonError, JsonErrorKind};
use std::sync::OnceLock;

static CODE_FENCE: OnceLock<Regex> = OnceLock::new();
static TRAILING_COMMA: OnceLock<Regex> = OnceLock::new();
static LINE_COMMENT: OnceLock<Regex> = OnceLock::new();
static MISSING_COMMA: OnceLock<Regex> = OnceLock::new();

fn compiled(
    cell: &'static OnceLock<Regex>,
    build: impl FnOnce() -> Result<Regex, regex::Error>,
) -> Result<&'static Regex, JsonError> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = build().map_err(|e| JsonError::new(JsonErrorKind::Pattern(e.to_string())))?;
    Ok(cell.get_or_init(|| re))
}

/// First fenced block, with an optional `json` tag.
pub(crate) fn code_fence() -> Result<&'static Regex, JsonError> {
    compiled(&CODE_FENCE, || {
        RegexBuilder::new(r"```(?:json)?\s*([\s\S]*?)\s*```")
            .case_insensitive(true)
            .build()
    })
}

/// A comma directly before a closing brace or bracket.
pub(crate) fn trailing_comma() -> Result<&'static Regex, JsonError> {
    compiled(&TRAILING_COMMA, || Regex::new(r",\s*([}\]])"))
}

/// A whole line starting with `//` or `#`.
pub(crate) fn line_comment() -> Result<&'static Regex, JsonError> {
    compiled(&LINE_COMMENT, || Regex::new(r"(?m)^\s*(//|#).*$"))
}

/// A value at line end followed by a line opening with a quoted key.
pub(crate) fn missing_comma() -> Result<&'static Regex, JsonError> {
    compiled(&MISSING_COMMA, || {
        RegexBuilder::new(r#"("|\d|\]|\}|true|false|null)\s*\n(\s*")"#)
            .case_insensitive(true)
            .build()
    })
}
