//! Provider identifiers.

use serde::{Deserialize, Serialize};

/// The three vendor wire formats SimpleChat speaks.
///
/// Parsing is case-insensitive; anything else is rejected.
///
/// # Examples
///
/// ```
/// use simplechat_core::ProviderKind;
/// use std::str::FromStr;
///
/// assert_eq!(ProviderKind::from_str("Claude").unwrap(), ProviderKind::Claude);
/// assert!(ProviderKind::from_str("mistral").is_err());
/// assert_eq!(ProviderKind::Gemini.to_string(), "gemini");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    /// OpenAI and OpenAI-compatible chat completion APIs
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi,
    /// Anthropic messages API
    Claude,
    /// Google Gemini generateContent API
    Gemini,
}

impl ProviderKind {
    /// Base URL used when a config leaves `base_url` empty.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Claude => "https://api.anthropic.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    /// Whether the provider can generate or edit images.
    pub fn supports_image_generation(&self) -> bool {
        matches!(self, ProviderKind::Gemini)
    }
}
