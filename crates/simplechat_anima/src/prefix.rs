//! File name prefixes for XY cells.

use crate::split_list;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

const MAX_PREFIX_CHARS: usize = 120;
const FALLBACK_PREFIX: &str = "cell";
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Which cells get a prefix.
///
/// The triangular and diagonal modes apply only when both axes have the
/// same length; otherwise every cell is produced.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MatrixMode {
    /// Every cell, row-major by Y
    #[default]
    Full,
    /// Cells with column index at or above the row index
    UpperTriangle,
    /// Cells where X and Y share an index
    DiagonalOnly,
}

/// Makes a string safe as a file name prefix.
///
/// Runs of reserved characters and runs of whitespace each become one `_`.
/// Tabs and line breaks always become `_`. Leading and trailing dots and
/// spaces are removed and the result is capped at 120 characters.
///
/// # Examples
///
/// ```
/// use simplechat_anima::sanitize_prefix;
///
/// assert_eq!(sanitize_prefix(" @a+@b: night city. "), "@a+@b__night_city");
/// assert_eq!(sanitize_prefix("..."), "");
/// ```
pub fn sanitize_prefix(text: &str) -> String {
    let text = text.trim();
    let mut out = String::with_capacity(text.len());
    let mut previous_illegal = false;
    let mut previous_space = false;

    for ch in text.chars() {
        if ILLEGAL_CHARS.contains(&ch) {
            if !previous_illegal {
                out.push('_');
            }
            previous_illegal = true;
            previous_space = false;
        } else if matches!(ch, '\n' | '\r' | '\t') {
            out.push('_');
            previous_illegal = false;
            previous_space = false;
        } else if ch.is_whitespace() {
            if !previous_space {
                out.push('_');
            }
            previous_space = true;
            previous_illegal = false;
        } else {
            out.push(ch);
            previous_illegal = false;
            previous_space = false;
        }
    }

    let trimmed = out.trim_matches([' ', '.']);
    if trimmed.chars().count() <= MAX_PREFIX_CHARS {
        return trimmed.to_string();
    }
    let capped: String = trimmed.chars().take(MAX_PREFIX_CHARS).collect();
    capped.trim_end_matches([' ', '.']).to_string()
}

/// Produces one file name prefix per XY cell, in the order
/// [`crate::XyMatrix`] produces cells.
///
/// # Examples
///
/// ```
/// use simplechat_anima::XyCellPrefix;
///
/// let prefixes = XyCellPrefix::default().build("@a\n@b", "@a\n@b");
/// assert_eq!(prefixes, vec!["@a", "@b+@a", "@a+@b", "@b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct XyCellPrefix {
    /// Separator between the X and Y labels
    #[builder(default = r#""+".to_string()"#)]
    joiner: String,
    /// Use a single label when X equals Y
    #[builder(default = "true")]
    diagonal_single: bool,
    /// Text prepended to every name
    #[builder(default)]
    base_prefix: String,
    /// Apply [`sanitize_prefix`]
    #[builder(default = "true")]
    sanitize: bool,
    /// Which cells to produce
    #[builder(default)]
    mode: MatrixMode,
}

impl Default for XyCellPrefix {
    fn default() -> Self {
        Self {
            joiner: "+".to_string(),
            diagonal_single: true,
            base_prefix: String::new(),
            sanitize: true,
            mode: MatrixMode::Full,
        }
    }
}

impl XyCellPrefix {
    /// Creates a new builder for `XyCellPrefix`.
    pub fn builder() -> XyCellPrefixBuilder {
        XyCellPrefixBuilder::default()
    }

    fn name(&self, x: &str, y: &str) -> String {
        let (x, y) = (x.trim(), y.trim());
        let joiner = if self.joiner.is_empty() { "+" } else { self.joiner.as_str() };
        let label = if self.diagonal_single && !x.is_empty() && x == y {
            x.to_string()
        } else if !x.is_empty() && !y.is_empty() {
            format!("{}{}{}", x, joiner, y)
        } else if x.is_empty() {
            y.to_string()
        } else {
            x.to_string()
        };

        let mut name = format!("{}{}", self.base_prefix, label);
        if self.sanitize {
            name = sanitize_prefix(&name);
        }
        if name.is_empty() {
            FALLBACK_PREFIX.to_string()
        } else {
            name
        }
    }

    /// Builds prefixes from newline-separated X and Y labels.
    pub fn build(&self, x_labels: &str, y_labels: &str) -> Vec<String> {
        let mut xs = split_list(x_labels);
        if xs.is_empty() {
            xs.push(String::new());
        }
        let mut ys = split_list(y_labels);
        if ys.is_empty() {
            ys.push(String::new());
        }

        let square = xs.len() == ys.len();
        match self.mode {
            MatrixMode::UpperTriangle if square => (0..ys.len())
                .flat_map(|row| (row..xs.len()).map(move |col| (col, row)))
                .map(|(col, row)| self.name(&xs[col], &ys[row]))
                .collect(),
            MatrixMode::DiagonalOnly if square => xs
                .iter()
                .zip(&ys)
                .map(|(x, y)| self.name(x, y))
                .collect(),
            _ => ys
                .iter()
                .flat_map(|y| xs.iter().map(move |x| self.name(x, y)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_runs_collapse() {
        assert_eq!(sanitize_prefix("a<>b"), "a_b");
        assert_eq!(sanitize_prefix("a\n\nb"), "a__b");
        assert_eq!(sanitize_prefix("a \t b"), "a___b");
    }

    #[test]
    fn long_names_are_capped() {
        let long = format!("{}.  tail", "x".repeat(119));
        let sanitized = sanitize_prefix(&long);
        assert_eq!(sanitized, "x".repeat(119));
    }
}
