//! NoASS roleplay chat node.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use simplechat_core::{ChatConfig, ImageData};
use simplechat_error::{BuilderError, SimpleChatResult};
use simplechat_interface::ChatRequest;
use simplechat_models::ProviderRegistry;
use simplechat_template::noass;
use tracing::{debug, instrument};

/// Inputs for one NoASS turn.
#[derive(Debug, Clone, PartialEq, Builder, Getters)]
#[builder(setter(into))]
pub struct NoassInput {
    /// World, characters and instructions
    #[builder(default)]
    scenario: String,
    /// The user's action or dialogue for this turn
    user_action: String,
    /// Text the character's reply must start with
    #[builder(default)]
    prefill: String,
    /// Transcript so far; blank means no prior turns
    #[builder(default)]
    history: String,
    /// Optional image forwarded with the request
    #[builder(default)]
    image: Option<ImageData>,
    /// User speaker name
    #[builder(default = r#""User".to_string()"#)]
    user_name: String,
    /// Character speaker name
    #[builder(default = r#""Assistant".to_string()"#)]
    char_name: String,
    /// Sampling temperature
    #[builder(default = "1.0")]
    temperature: f64,
    /// Maximum tokens to generate
    #[builder(default = "2048")]
    max_tokens: u32,
}

impl NoassInput {
    /// Creates a new builder for `NoassInput`.
    pub fn builder() -> NoassInputBuilder {
        NoassInputBuilder::default()
    }

    fn prior_history(&self) -> Option<&str> {
        Some(self.history.as_str()).filter(|h| !h.trim().is_empty())
    }
}

/// Reply text and the updated transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct NoassOutput {
    /// Character reply, starting with the prefill when one was given
    text: String,
    /// Full transcript including this turn
    history: String,
}

/// Runs a roleplay turn in NoASS layout.
#[derive(Debug, Clone, Default)]
pub struct NoassChatNode {
    registry: ProviderRegistry,
}

impl NoassChatNode {
    /// Node using every compiled-in provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node resolving clients through `registry`.
    pub fn with_registry(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Sends one turn and folds the reply into the transcript.
    ///
    /// Generation stops before the model writes the user's next line; any
    /// such line that slips through is cut from the reply.
    #[instrument(skip(self, config, input), fields(provider = %config.provider(), model = %config.model()))]
    pub async fn run(&self, config: &ChatConfig, input: &NoassInput) -> SimpleChatResult<NoassOutput> {
        let provider = self.registry.resolve(config)?;
        let history = input.prior_history();

        let messages = noass::build_messages(
            &input.scenario,
            history,
            &input.user_action,
            &input.prefill,
            &input.user_name,
            &input.char_name,
        );
        let request = ChatRequest::builder()
            .messages(messages)
            .model(config.model().clone())
            .temperature(input.temperature)
            .max_tokens(input.max_tokens)
            .images(input.image.iter().cloned().collect::<Vec<_>>())
            .stop(noass::stop_sequences(&input.user_name))
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let response = provider.chat(&request).await?;
        let reply = noass::extract_response(response.text(), &input.user_name);
        debug!(reply_len = reply.len(), "Received NoASS reply");

        let history = noass::build_full_history(
            history,
            &input.user_action,
            &input.prefill,
            &reply,
            &input.user_name,
            &input.char_name,
        );
        let text = if input.prefill.trim().is_empty() {
            reply
        } else {
            format!("{} {}", input.prefill, reply)
        };

        Ok(NoassOutput { text, history })
    }
}
