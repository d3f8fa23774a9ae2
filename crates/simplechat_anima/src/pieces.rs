//! Small text helpers shared by the router and the matrix.

use serde_json::Value;

/// Text form of a JSON value: strings verbatim, null empty, anything else
/// as compact JSON.
pub fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Trims a prompt piece and drops trailing ASCII or full-width commas.
pub fn clean_piece(piece: &str) -> &str {
    piece.trim().trim_end_matches([',', '，']).trim()
}

/// Joins the non-empty cleaned pieces with `", "`.
///
/// # Examples
///
/// ```
/// use simplechat_anima::join_pieces;
///
/// assert_eq!(join_pieces(["masterpiece,", "", " 1girl ，", "@artist"]), "masterpiece, 1girl, @artist");
/// ```
pub fn join_pieces<'a>(pieces: impl IntoIterator<Item = &'a str>) -> String {
    pieces
        .into_iter()
        .map(clean_piece)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One entry per non-blank line, skipping `#` and `//` comment lines.
pub fn split_list(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| line.split('\r'))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("//"))
        .map(str::to_string)
        .collect()
}
