//! Plain chat nodes.

use derive_builder::Builder;
use derive_getters::Getters;
use simplechat_core::{ChatConfig, ImageData, Message, Vars};
use simplechat_error::{BuilderError, SimpleChatResult};
use simplechat_interface::ChatRequest;
use simplechat_models::ProviderRegistry;
use simplechat_template::render;
use tracing::{debug, instrument};

/// Inputs shared by [`ChatNode`] and [`ChatImageNode`].
///
/// `prompt` and `system` are rendered with `vars` before sending; unknown
/// placeholders are kept as written.
#[derive(Debug, Clone, PartialEq, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatInput {
    /// User prompt
    prompt: String,
    /// System prompt, omitted when blank
    #[builder(default)]
    system: String,
    /// Sampling temperature
    #[builder(default = "1.0")]
    temperature: f64,
    /// Maximum tokens to generate
    #[builder(default = "2048")]
    max_tokens: u32,
    /// Template variables
    #[builder(default)]
    vars: Vars,
}

impl ChatInput {
    /// Creates a new builder for `ChatInput`.
    pub fn builder() -> ChatInputBuilder {
        ChatInputBuilder::default()
    }

    /// Rendered system (when non-blank) and user messages.
    pub fn messages(&self) -> SimpleChatResult<Vec<Message>> {
        let system = render(&self.system, &self.vars, true)?;
        let prompt = render(&self.prompt, &self.vars, true)?;

        let mut messages = Vec::with_capacity(2);
        if !system.trim().is_empty() {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));
        Ok(messages)
    }

    fn request(&self, config: &ChatConfig, images: Vec<ImageData>) -> SimpleChatResult<ChatRequest> {
        Ok(ChatRequest::builder()
            .messages(self.messages()?)
            .model(config.model().clone())
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .images(images)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }
}

/// Sends a text prompt and returns the reply text.
#[derive(Debug, Clone, Default)]
pub struct ChatNode {
    registry: ProviderRegistry,
}

impl ChatNode {
    /// Node using every compiled-in provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node resolving clients through `registry`.
    pub fn with_registry(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Runs one chat call.
    ///
    /// # Errors
    ///
    /// Fails on an unavailable provider, a template error or any provider error.
    #[instrument(skip(self, config, input), fields(provider = %config.provider(), model = %config.model()))]
    pub async fn run(&self, config: &ChatConfig, input: &ChatInput) -> SimpleChatResult<String> {
        let provider = self.registry.resolve(config)?;
        let request = input.request(config, Vec::new())?;
        debug!(messages = request.messages().len(), "Sending chat request");
        let response = provider.chat(&request).await?;
        Ok(response.text().clone())
    }
}

/// Sends a prompt with one image attached for visual analysis.
#[derive(Debug, Clone, Default)]
pub struct ChatImageNode {
    registry: ProviderRegistry,
}

impl ChatImageNode {
    /// Default prompt when the caller has none.
    pub const DEFAULT_PROMPT: &'static str = "Describe this image.";

    /// Node using every compiled-in provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node resolving clients through `registry`.
    pub fn with_registry(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Runs one chat call with `image` attached to the user message.
    #[instrument(skip(self, config, input, image), fields(provider = %config.provider(), model = %config.model(), mime = %image.mime()))]
    pub async fn run(
        &self,
        config: &ChatConfig,
        input: &ChatInput,
        image: &ImageData,
    ) -> SimpleChatResult<String> {
        let provider = self.registry.resolve(config)?;
        let request = input.request(config, vec![image.clone()])?;
        let response = provider.chat(&request).await?;
        Ok(response.text().clone())
    }
}
