//! Text-to-list node.

use serde::{Deserialize, Serialize};

/// How [`TextListNode`] splits its input.
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
pub enum SplitMode {
    /// One item per line
    #[default]
    Lines,
    /// Items separated by commas or line breaks
    Comma,
    /// Lines when the text has a line break, commas otherwise
    LinesOrComma,
}

/// Splits text into a list of items for batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextListNode;

impl TextListNode {
    /// Trimmed, non-blank items; `#` and `//` comment items are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use simplechat_nodes::{SplitMode, TextListNode};
    ///
    /// assert_eq!(TextListNode.run("a, b,,c", SplitMode::Comma), vec!["a", "b", "c"]);
    /// assert_eq!(TextListNode.run("a, b\nc", SplitMode::LinesOrComma), vec!["a, b", "c"]);
    /// ```
    pub fn run(&self, text: &str, mode: SplitMode) -> Vec<String> {
        let text = text.trim().replace("\r\n", "\n").replace('\r', "\n");
        if text.is_empty() {
            return Vec::new();
        }

        let by_lines = match mode {
            SplitMode::Lines => true,
            SplitMode::Comma => false,
            SplitMode::LinesOrComma => text.contains('\n'),
        };
        let parts: Vec<&str> = if by_lines {
            text.split('\n').collect()
        } else {
            text.split([',', '\n']).collect()
        };

        parts
            .into_iter()
            .map(str::trim)
            .filter(|item| !item.is_empty() && !item.starts_with('#') && !item.starts_with("//"))
            .map(str::to_string)
            .collect()
    }
}
