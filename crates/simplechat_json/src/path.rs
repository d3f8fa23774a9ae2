//! Dot/bracket path lookup.
//!
//! Paths look like `items[0].name`, `a["key with.dot"]` or `a['k'].b`.
//! Lookups never fail: any mismatch yields `None`.

use serde_json::Value;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathToken {
    /// Object member
    Key(String),
    /// Array position; negative values count from the end
    Index(i64),
}

/// Splits a path into tokens.
///
/// Dot segments are always keys. Bracket contents are quoted keys, integer
/// indices, or bare keys. An unterminated `[` becomes one literal key holding
/// the rest of the path.
///
/// # Examples
///
/// ```
/// use simplechat_json::{PathToken, tokenize};
///
/// assert_eq!(
///     tokenize("a.b[1]['c']"),
///     vec![
///         PathToken::Key("a".into()),
///         PathToken::Key("b".into()),
///         PathToken::Index(1),
///         PathToken::Key("c".into()),
///     ]
/// );
/// assert_eq!(tokenize("a[0"), vec![PathToken::Key("a".into()), PathToken::Key("[0".into())]);
/// ```
pub fn tokenize(path: &str) -> Vec<PathToken> {
    let path = path.trim();
    let mut tokens = Vec::new();
    let mut rest = path;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '.' => rest = &rest[1..],
            '[' => match rest[1..].find(']') {
                None => {
                    tokens.push(PathToken::Key(rest.to_string()));
                    break;
                }
                Some(close) => {
                    tokens.push(bracket_token(rest[1..=close].trim()));
                    rest = &rest[close + 2..];
                }
            },
            _ => {
                let end = rest.find(['.', '[']).unwrap_or(rest.len());
                let key = rest[..end].trim();
                if !key.is_empty() {
                    tokens.push(PathToken::Key(key.to_string()));
                }
                rest = &rest[end..];
            }
        }
    }
    tokens
}

fn bracket_token(inner: &str) -> PathToken {
    let quoted = inner.len() >= 2
        && ((inner.starts_with('"') && inner.ends_with('"'))
            || (inner.starts_with('\'') && inner.ends_with('\'')));
    if quoted {
        return PathToken::Key(inner[1..inner.len() - 1].to_string());
    }
    match inner.parse::<i64>() {
        Ok(index) => PathToken::Index(index),
        Err(_) => PathToken::Key(inner.to_string()),
    }
}

/// Walks `tokens` from `root`; `None` means the value is missing.
pub fn extract<'a>(root: &'a Value, tokens: &[PathToken]) -> Option<&'a Value> {
    tokens.iter().try_fold(root, |current, token| match token {
        PathToken::Index(index) => {
            let items = current.as_array()?;
            let len = i64::try_from(items.len()).ok()?;
            let position = if *index < 0 { len + index } else { *index };
            if (0..len).contains(&position) {
                items.get(usize::try_from(position).ok()?)
            } else {
                None
            }
        }
        PathToken::Key(key) => current.as_object()?.get(key),
    })
}

/// Resolves a textual path against `root`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use simplechat_json::extract_path;
///
/// let data = json!({"a": {"b": [{}, {"c": "x"}]}});
/// assert_eq!(extract_path(&data, "a.b[1].c"), Some(&json!("x")));
/// assert_eq!(extract_path(&json!({"a": {"b": [{}]}}), "a.b[1].c"), None);
/// ```
pub fn extract_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    extract(root, &tokenize(path))
}

/// Text form of a resolved value.
///
/// Null is empty, strings are verbatim, booleans are `True` / `False`,
/// numbers use their natural form and containers become compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quoted_keys_may_contain_dots() {
        let data = json!({"a.b": {"c": 1}});
        assert_eq!(extract_path(&data, "[\"a.b\"].c"), Some(&json!(1)));
    }

    #[test]
    fn negative_index_within_bounds() {
        let data = json!({"items": [1, 2, 3]});
        assert_eq!(extract_path(&data, "items[-1]"), Some(&json!(3)));
        assert_eq!(extract_path(&data, "items[-3]"), Some(&json!(1)));
        assert_eq!(extract_path(&data, "items[-4]"), None);
        assert_eq!(extract_path(&data, "items[3]"), None);
    }

    #[test]
    fn wrong_container_kind_is_missing() {
        let data = json!({"a": [1], "b": {"0": "zero"}});
        assert_eq!(extract_path(&data, "a.x"), None);
        assert_eq!(extract_path(&data, "b[0]"), None);
        assert_eq!(extract_path(&data, "b.0"), Some(&json!("zero")));
    }

    #[test]
    fn null_is_present_but_stringifies_empty() {
        let data = json!({"a": null});
        let value = extract_path(&data, "a");
        assert_eq!(value, Some(&Value::Null));
        assert_eq!(value.map(stringify), Some(String::new()));
    }

    #[test]
    fn empty_path_resolves_to_root() {
        let data = json!([1]);
        assert_eq!(tokenize("   "), Vec::<PathToken>::new());
        assert_eq!(extract_path(&data, ""), Some(&data));
    }

    #[test]
    fn stringify_forms() {
        assert_eq!(stringify(&json!(3)), "3");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!(true)), "True");
        assert_eq!(stringify(&json!({"k": [1, 2]})), "{\"k\":[1,2]}");
    }
}
