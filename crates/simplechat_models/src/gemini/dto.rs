//! Gemini response data transfer objects.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Base64 payload of an inline-data part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiInlineData {
    /// MIME type of the payload
    #[serde(default, alias = "mime_type")]
    mime_type: String,
    /// Base64-encoded bytes
    #[serde(default)]
    data: String,
}

/// One part of a candidate's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    /// Text output
    #[serde(default)]
    text: Option<String>,
    /// Inline binary output
    #[serde(default, alias = "inline_data")]
    inline_data: Option<GeminiInlineData>,
}

/// Content of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct GeminiContent {
    /// Output parts in order
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// A response candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiCandidate {
    /// Generated content
    #[serde(default)]
    content: GeminiContent,
}

/// generateContent reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiResponse {
    /// Candidates, first one is used
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}
