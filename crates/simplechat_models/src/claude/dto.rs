//! Anthropic response data transfer objects.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A content block in a Claude reply.
///
/// Only `text` blocks carry output; other block types are kept so the reply
/// still decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ClaudeContentBlock {
    /// Block type ("text", "tool_use", ...)
    #[serde(rename = "type", default)]
    block_type: String,
    /// Text of a `text` block
    #[serde(default)]
    text: Option<String>,
}

/// Claude messages API reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ClaudeMessageResponse {
    /// Reply content blocks
    #[serde(default)]
    content: Vec<ClaudeContentBlock>,
}

impl ClaudeMessageResponse {
    /// Concatenates every `text` block.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect()
    }
}
