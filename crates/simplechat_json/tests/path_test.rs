use serde_json::json;
use simplechat_json::{PathToken, extract_path, stringify, tokenize};

#[test]
fn nested_path_resolves() {
    let data = json!({"a": {"b": [{}, {"c": "x"}]}});
    assert_eq!(extract_path(&data, "a.b[1].c").map(stringify), Some("x".to_string()));
}

#[test]
fn out_of_range_is_missing() {
    let data = json!({"a": {"b": [{}]}});
    assert!(extract_path(&data, "a.b[1].c").is_none());
}

#[test]
fn double_quoted_bracket_key() {
    let data = json!({"items": [{"full name": "Ada"}]});
    assert_eq!(
        extract_path(&data, "items[0][\"full name\"]"),
        Some(&json!("Ada"))
    );
    assert_eq!(
        extract_path(&data, "items[0]['full name']"),
        Some(&json!("Ada"))
    );
}

#[test]
fn unterminated_bracket_degrades_to_literal_key() {
    assert_eq!(
        tokenize("tags[2"),
        vec![
            PathToken::Key("tags".to_string()),
            PathToken::Key("[2".to_string())
        ]
    );
    let data = json!({"tags": {"[2": "literal"}});
    assert_eq!(extract_path(&data, "tags[2"), Some(&json!("literal")));
}

#[test]
fn bare_bracket_word_is_a_key() {
    let data = json!({"a": {"b": 1}});
    assert_eq!(extract_path(&data, "a[b]"), Some(&json!(1)));
}

#[test]
fn container_values_stringify_as_json() {
    let data = json!({"a": {"list": [1, "two", null]}});
    let value = extract_path(&data, "a").map(stringify);
    assert_eq!(value.as_deref(), Some("{\"list\":[1,\"two\",null]}"));
}
