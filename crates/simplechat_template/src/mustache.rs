//! Mustache-style placeholder substitution.

use regex::{Captures, Regex};
use simplechat_core::Vars;
use simplechat_error::TemplateError;
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> Result<&'static Regex, TemplateError> {
    if let Some(re) = PLACEHOLDER.get() {
        return Ok(re);
    }
    let re = Regex::new(r"\{\{\s*([^{}\n]+?)\s*\}\}")
        .map_err(|e| TemplateError::new(format!("Invalid placeholder regex: {}", e)))?;
    Ok(PLACEHOLDER.get_or_init(|| re))
}

/// Replaces `{{ key }}` tokens with values from `vars`.
///
/// Whitespace around `key` is ignored and names are case-sensitive. Null
/// values render as the empty string. Unknown keys are left verbatim when
/// `keep_unmatched` is set and removed otherwise. Substituted values are
/// never rescanned, so braces inside a value stay literal.
///
/// # Examples
///
/// ```
/// use simplechat_core::Vars;
/// use simplechat_template::render;
///
/// let mut vars = Vars::new();
/// vars.insert("name", "Alice");
///
/// assert_eq!(render("Hi {{ name }}!", &vars, true).unwrap(), "Hi Alice!");
/// assert_eq!(render("{{missing}}", &vars, true).unwrap(), "{{missing}}");
/// assert_eq!(render("a{{missing}}b", &vars, false).unwrap(), "ab");
/// ```
///
/// # Errors
///
/// Returns a [`TemplateError`] only if the placeholder pattern fails to compile.
pub fn render(text: &str, vars: &Vars, keep_unmatched: bool) -> Result<String, TemplateError> {
    if text.is_empty() || !text.contains("{{") || !text.contains("}}") {
        return Ok(text.to_string());
    }

    let rendered = placeholder_regex()?.replace_all(text, |caps: &Captures<'_>| {
        let key = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        match vars.get(key) {
            Some(value) if !key.is_empty() => value.to_string(),
            _ if keep_unmatched => caps[0].to_string(),
            _ => String::new(),
        }
    });
    Ok(rendered.into_owned())
}

/// Placeholder names in `text`, in order of appearance, without duplicates.
pub fn placeholders(text: &str) -> Result<Vec<String>, TemplateError> {
    let mut names: Vec<String> = Vec::new();
    for caps in placeholder_regex()?.captures_iter(text) {
        let key = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        if !key.is_empty() && !names.iter().any(|n| n == key) {
            names.push(key.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplechat_core::VarValue;

    fn vars(pairs: &[(&str, VarValue)]) -> Vars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn text_without_braces_is_identity() {
        let v = vars(&[("a", VarValue::from("x"))]);
        for text in ["", "plain", "{ not }", "{{ open only", "close only }}"] {
            assert_eq!(render(text, &v, false).unwrap(), text);
        }
    }

    #[test]
    fn value_braces_are_not_rescanned() {
        let v = vars(&[
            ("a", VarValue::from("{{b}}")),
            ("b", VarValue::from("nope")),
        ]);
        assert_eq!(render("{{a}}", &v, true).unwrap(), "{{b}}");
    }

    #[test]
    fn null_and_scalars_stringify() {
        let v = vars(&[
            ("n", VarValue::Null),
            ("i", VarValue::Int(7)),
            ("b", VarValue::Bool(false)),
        ]);
        assert_eq!(render("[{{n}}|{{ i }}|{{b}}]", &v, true).unwrap(), "[|7|False]");
    }

    #[test]
    fn blank_placeholder_follows_keep_flag() {
        let v = Vars::new();
        assert_eq!(render("a{{   }}b", &v, true).unwrap(), "a{{   }}b");
        assert_eq!(render("a{{   }}b", &v, false).unwrap(), "ab");
    }

    #[test]
    fn placeholders_in_order() {
        let names = placeholders("{{ b }} {{a}} {{b}}").unwrap();
        assert_eq!(names, vec!["b", "a"]);
    }
}
