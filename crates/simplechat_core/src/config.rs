//! API connection configuration.

use crate::ProviderKind;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use simplechat_error::{ConfigError, SimpleChatResult};
use std::str::FromStr;

/// Connection settings for one provider call.
///
/// Built once per request and never mutated. An empty `base_url` is replaced
/// by the provider default at construction.
///
/// # Examples
///
/// ```
/// use simplechat_core::{ChatConfig, ProviderKind};
///
/// let config = ChatConfig::new(ProviderKind::Claude, "sk-ant", "", "claude-3-5-haiku-20241022");
/// assert_eq!(config.base_url(), "https://api.anthropic.com/v1");
///
/// let err = ChatConfig::from_parts("mistral", "key", "", "model");
/// assert!(err.is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatConfig {
    /// Which vendor wire format to use
    provider: ProviderKind,
    /// API key (bearer token, `x-api-key` header or `key` query parameter)
    api_key: String,
    /// API base URL without trailing endpoint path
    base_url: String,
    /// Model identifier
    model: String,
}

impl ChatConfig {
    /// Creates a config, defaulting an empty `base_url` to the provider's endpoint.
    pub fn new(
        provider: ProviderKind,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.trim().is_empty() {
            provider.default_base_url().to_string()
        } else {
            base_url.trim().to_string()
        };
        Self {
            provider,
            api_key: api_key.into(),
            base_url,
            model: model.into(),
        }
    }

    /// Creates a config from a provider name as typed by a user.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `provider` is not one of
    /// `openai`, `claude` or `gemini`.
    pub fn from_parts(
        provider: &str,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> SimpleChatResult<Self> {
        let kind = ProviderKind::from_str(provider.trim())
            .map_err(|_| ConfigError::new(format!("Unknown provider: {}", provider)))?;
        Ok(Self::new(kind, api_key, base_url, model))
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
