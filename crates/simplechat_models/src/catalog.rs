//! Model-list lookup with static fallback.
//!
//! Lookups are best effort: any failure or empty result falls back to the
//! predefined list from settings, so this path never returns an error.

use crate::SimpleChatSettings;
use crate::transport::{ANTHROPIC_VERSION, endpoint, send_json};
use reqwest::Client;
use serde_json::Value;
use simplechat_core::ProviderKind;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Lists models for a provider.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    settings: SimpleChatSettings,
    client: Client,
}

impl ModelCatalog {
    /// Creates a catalog backed by `settings`.
    pub fn new(settings: SimpleChatSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// Predefined models for `provider`.
    pub fn predefined(&self, provider: ProviderKind) -> Vec<String> {
        self.settings.models(provider).to_vec()
    }

    /// Every predefined model, provider by provider.
    pub fn all_predefined(&self) -> Vec<String> {
        [ProviderKind::OpenAi, ProviderKind::Claude, ProviderKind::Gemini]
            .into_iter()
            .flat_map(|kind| self.predefined(kind))
            .collect()
    }

    /// Lists models for a provider name.
    ///
    /// Unknown provider names yield an empty list. Without an API key the
    /// predefined list is returned without any request.
    #[instrument(skip(self, api_key), fields(has_key = !api_key.is_empty()))]
    pub async fn list(&self, provider: &str, api_key: &str, base_url: &str) -> Vec<String> {
        let Ok(kind) = ProviderKind::from_str(provider.trim()) else {
            debug!("Unknown provider, no models");
            return Vec::new();
        };
        if api_key.trim().is_empty() {
            return self.predefined(kind);
        }

        let base_url = if base_url.trim().is_empty() {
            self.settings.base_url(kind)
        } else {
            base_url.trim().to_string()
        };

        match self.fetch(kind, api_key, &base_url).await {
            Some(models) if !models.is_empty() => models,
            _ => {
                warn!(provider = %kind, "Model list unavailable, using predefined models");
                self.predefined(kind)
            }
        }
    }

    async fn fetch(&self, kind: ProviderKind, api_key: &str, base_url: &str) -> Option<Vec<String>> {
        let timeout = Duration::from_secs(self.settings.defaults.model_list_timeout_secs);
        let url = endpoint(base_url, "models");
        let request = match kind {
            ProviderKind::OpenAi => self.client.get(url).bearer_auth(api_key),
            ProviderKind::Claude => self
                .client
                .get(url)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
            ProviderKind::Gemini => self.client.get(url).query(&[("key", api_key)]),
        }
        .timeout(timeout);

        let body = send_json(kind.as_ref(), request)
            .await
            .map_err(|e| debug!(error = %e, "Model list request failed"))
            .ok()?;

        Some(match kind {
            ProviderKind::OpenAi => parse_openai_models(&body),
            ProviderKind::Claude => parse_claude_models(&body),
            ProviderKind::Gemini => parse_gemini_models(&body),
        })
    }
}

/// Model ids from an OpenAI `{"data": [{"id": ...}]}` listing, sorted.
pub fn parse_openai_models(body: &Value) -> Vec<String> {
    let mut models: Vec<String> = body
        .get("data")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|m| m.get("id").and_then(Value::as_str))
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    models.sort();
    models
}

/// Model ids from a Claude listing, sorted.
///
/// Accepts `data` or `models` arrays whose items are objects with `id` or
/// `name`, or bare strings.
pub fn parse_claude_models(body: &Value) -> Vec<String> {
    let items = match body.get("data") {
        Some(data) => data.as_array(),
        None => body.get("models").and_then(Value::as_array),
    };
    let mut models: Vec<String> = items
        .map(|items| {
            items
                .iter()
                .filter_map(|m| match m {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(o) => o
                        .get("id")
                        .or_else(|| o.get("name"))
                        .and_then(Value::as_str),
                    _ => None,
                })
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    models.sort();
    models
}

/// Model names from a Gemini listing with the `models/` prefix removed, sorted.
pub fn parse_gemini_models(body: &Value) -> Vec<String> {
    let mut models: Vec<String> = body
        .get("models")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|m| m.get("name").and_then(Value::as_str))
                .map(|name| name.strip_prefix("models/").unwrap_or(name))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    models.sort();
    models
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn claude_accepts_mixed_listing_shapes() {
        let body = json!({
            "models": [{"name": "b-model"}, "a-model", {"id": ""}, 7]
        });
        assert_eq!(parse_claude_models(&body), vec!["a-model", "b-model"]);
    }

    #[test]
    fn claude_prefers_data_key() {
        let body = json!({
            "data": [{"id": "claude-x", "name": "ignored"}],
            "models": ["other"]
        });
        assert_eq!(parse_claude_models(&body), vec!["claude-x"]);
    }

    #[test]
    fn gemini_strips_models_prefix() {
        let body = json!({
            "models": [{"name": "models/gemini-2.0-flash"}, {"name": "models/gemini-1.5-pro"}]
        });
        assert_eq!(
            parse_gemini_models(&body),
            vec!["gemini-1.5-pro", "gemini-2.0-flash"]
        );
    }

    #[test]
    fn openai_listing_sorted() {
        let body = json!({"data": [{"id": "gpt-4o"}, {"id": "gpt-3.5-turbo"}]});
        assert_eq!(parse_openai_models(&body), vec!["gpt-3.5-turbo", "gpt-4o"]);
        assert!(parse_openai_models(&json!({})).is_empty());
    }
}
