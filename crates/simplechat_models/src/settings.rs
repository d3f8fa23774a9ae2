//! Layered settings for providers and node defaults.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (`simplechat.toml` compiled into this crate)
//! - `~/.config/simplechat/simplechat.toml`
//! - `./simplechat.toml`

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use simplechat_core::ProviderKind;
use simplechat_error::{ConfigError, SimpleChatError, SimpleChatResult};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../simplechat.toml");

/// Settings for one provider.
///
/// # Example
///
/// ```toml
/// [providers.openai]
/// base_url = "http://localhost:8080/v1"
/// api_key_env = "OPENAI_API_KEY"
/// models = ["local-model"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct ProviderSettings {
    /// Base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Predefined model list used when the live listing is unavailable
    #[serde(default)]
    pub models: Vec<String>,
}

/// Defaults applied by the nodes and the CLI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Speaker name of the human in NoASS transcripts
    pub user_name: String,
    /// Speaker name of the model in NoASS transcripts
    pub char_name: String,
    /// Timeout for model-list lookups
    pub model_list_timeout_secs: u64,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 2048,
            user_name: "User".to_string(),
            char_name: "Assistant".to_string(),
            model_list_timeout_secs: 10,
        }
    }
}

/// Top-level SimpleChat settings.
///
/// # Example
///
/// ```no_run
/// use simplechat_core::ProviderKind;
/// use simplechat_models::SimpleChatSettings;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = SimpleChatSettings::load()?;
/// let models = settings.models(ProviderKind::Gemini);
/// println!("{} predefined Gemini models", models.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct SimpleChatSettings {
    /// Map of provider name to provider settings
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,

    /// Node and CLI defaults
    #[serde(default)]
    pub defaults: DefaultSettings,
}

impl SimpleChatSettings {
    /// Settings from the bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    pub fn bundled() -> SimpleChatResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is not valid settings TOML.
    pub fn from_toml_str(text: &str) -> SimpleChatResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
    }

    /// Load settings from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SimpleChatResult<Self> {
        debug!("Loading settings from file");
        Self::build(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Load settings with precedence: current dir > home dir > bundled defaults.
    ///
    /// User files are optional and skipped when absent.
    #[instrument]
    pub fn load() -> SimpleChatResult<Self> {
        debug!("Loading settings with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("simplechat/simplechat.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder.add_source(File::with_name("simplechat").required(false));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> SimpleChatResult<Self> {
        builder
            .build()
            .map_err(|e| {
                SimpleChatError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SimpleChatError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Settings for `provider`, if configured.
    pub fn provider(&self, provider: ProviderKind) -> Option<&ProviderSettings> {
        self.providers.get(provider.as_ref())
    }

    /// Predefined model list for `provider` (empty when unconfigured).
    pub fn models(&self, provider: ProviderKind) -> &[String] {
        self.provider(provider)
            .map(|p| p.models.as_slice())
            .unwrap_or_default()
    }

    /// Configured base URL for `provider`, or the built-in default.
    pub fn base_url(&self, provider: ProviderKind) -> String {
        self.provider(provider)
            .and_then(|p| p.base_url.clone())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| provider.default_base_url().to_string())
    }

    /// Reads the API key for `provider` from its configured environment variable.
    pub fn api_key(&self, provider: ProviderKind) -> Option<String> {
        let var = self.provider(provider)?.api_key_env.as_ref()?;
        std::env::var(var).ok().filter(|key| !key.trim().is_empty())
    }
}
