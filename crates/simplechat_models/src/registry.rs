//! Provider selection keyed on [`ProviderKind`].

use simplechat_core::{ChatConfig, ProviderKind};
use simplechat_error::{ConfigError, SimpleChatResult};
use simplechat_interface::ChatProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Builds a provider client from a connection config.
pub type ProviderConstructor = Arc<dyn Fn(&ChatConfig) -> Box<dyn ChatProvider> + Send + Sync>;

/// Maps each provider kind to a client constructor.
///
/// The default registry holds every client compiled into this crate.
/// Additional or replacement constructors can be registered, which is how
/// hosts plug in proxies and how tests plug in offline providers.
///
/// # Examples
///
/// ```
/// use simplechat_core::{ChatConfig, ProviderKind};
/// use simplechat_models::ProviderRegistry;
///
/// let registry = ProviderRegistry::default();
/// let config = ChatConfig::new(ProviderKind::Claude, "key", "", "claude-3-5-haiku-20241022");
/// let provider = registry.resolve(&config).unwrap();
/// assert_eq!(provider.provider_name(), "claude");
/// ```
#[derive(Clone)]
pub struct ProviderRegistry {
    constructors: HashMap<ProviderKind, ProviderConstructor>,
}

impl ProviderRegistry {
    /// Creates a registry with no providers.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers (or replaces) the constructor for `kind`.
    pub fn register<F>(&mut self, kind: ProviderKind, constructor: F) -> &mut Self
    where
        F: Fn(&ChatConfig) -> Box<dyn ChatProvider> + Send + Sync + 'static,
    {
        self.constructors.insert(kind, Arc::new(constructor));
        self
    }

    /// Whether a constructor exists for `kind`.
    pub fn contains(&self, kind: ProviderKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Builds the client for `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when no constructor is registered for the
    /// config's provider.
    #[instrument(skip(self, config), fields(provider = %config.provider(), model = %config.model()))]
    pub fn resolve(&self, config: &ChatConfig) -> SimpleChatResult<Box<dyn ChatProvider>> {
        let constructor = self.constructors.get(config.provider()).ok_or_else(|| {
            ConfigError::new(format!(
                "Provider {} is not available in this build",
                config.provider()
            ))
        })?;
        debug!("Resolved provider client");
        Ok(constructor(config))
    }

    /// Builds a client from a provider name as typed by a user.
    ///
    /// Unknown names fail here, before any client exists.
    pub fn resolve_name(
        &self,
        provider: &str,
        api_key: &str,
        base_url: &str,
        model: &str,
    ) -> SimpleChatResult<Box<dyn ChatProvider>> {
        let config = ChatConfig::from_parts(provider, api_key, base_url, model)?;
        self.resolve(&config)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::empty();
        #[cfg(feature = "openai")]
        registry.register(ProviderKind::OpenAi, |config| {
            Box::new(crate::OpenAiClient::new(config.api_key(), config.base_url()))
        });
        #[cfg(feature = "claude")]
        registry.register(ProviderKind::Claude, |config| {
            Box::new(crate::ClaudeClient::new(config.api_key(), config.base_url()))
        });
        #[cfg(feature = "gemini")]
        registry.register(ProviderKind::Gemini, |config| {
            Box::new(crate::GeminiClient::new(config.api_key(), config.base_url()))
        });
        registry
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.constructors.keys().collect();
        kinds.sort();
        f.debug_struct("ProviderRegistry")
            .field("providers", &kinds)
            .finish()
    }
}

/// Resolves `config` against the default registry.
pub fn provider_for(config: &ChatConfig) -> SimpleChatResult<Box<dyn ChatProvider>> {
    ProviderRegistry::default().resolve(config)
}
