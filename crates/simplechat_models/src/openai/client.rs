use crate::metrics::{LlmMetrics, Operation};
use crate::openai::OpenAiCompletion;
use crate::transport::{endpoint, image_target, send_json};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use simplechat_core::{ChatResponse, ContentPart, ImageData, Message, MessageContent, ProviderKind};
use simplechat_error::{ProviderError, ProviderErrorKind, SimpleChatResult};
use simplechat_interface::{ChatProvider, ChatRequest};
use std::time::Instant;
use tracing::{debug, instrument};

/// OpenAI API client (and compatible APIs such as local servers).
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI client.
    ///
    /// An empty `base_url` selects `https://api.openai.com/v1`.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.trim().is_empty() {
            ProviderKind::OpenAi.default_base_url().to_string()
        } else {
            base_url
        };
        debug!(base_url = %base_url, "Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    /// Builds the `/chat/completions` payload.
    ///
    /// Messages pass through unchanged except the trailing user message,
    /// which becomes a text part followed by one `image_url` part per image
    /// when images are attached.
    pub fn build_payload(request: &ChatRequest) -> Value {
        let target = image_target(request.messages(), request.images());
        let messages: Vec<Value> = request
            .messages()
            .iter()
            .enumerate()
            .map(|(i, message)| {
                if Some(i) == target {
                    with_images(message, request.images())
                } else {
                    json!({
                        "role": message.role.as_str(),
                        "content": content_value(&message.content),
                    })
                }
            })
            .collect();

        let mut payload = json!({
            "model": request.model(),
            "messages": messages,
            "temperature": request.temperature(),
            "max_tokens": request.max_tokens(),
        });
        if !request.stop().is_empty() {
            payload["stop"] = json!(request.stop());
        }
        payload
    }

    /// Reads the first choice's message content.
    pub fn parse_response(raw: Value) -> Result<ChatResponse, ProviderError> {
        let completion: OpenAiCompletion = serde_json::from_value(raw.clone()).map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Unexpected OpenAI response shape: {}",
                e
            )))
        })?;

        let choice = completion.choices().first().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(
                "OpenAI response contained no choices".to_string(),
            ))
        })?;
        let text = choice.message().content().clone().unwrap_or_default();

        ChatResponse::builder()
            .text(text)
            .raw(raw)
            .build()
            .map_err(|e| ProviderError::new(ProviderErrorKind::MalformedResponse(e.to_string())))
    }
}

fn image_part(image: &ImageData) -> Value {
    json!({
        "type": "image_url",
        "image_url": { "url": image.data_uri() },
    })
}

fn content_value(content: &MessageContent) -> Value {
    match content {
        MessageContent::Text(text) => json!(text),
        MessageContent::Parts(parts) => Value::Array(
            parts
                .iter()
                .map(|part| match part {
                    ContentPart::Text { text } => json!({ "type": "text", "text": text }),
                    ContentPart::Image { image } => image_part(image),
                })
                .collect(),
        ),
    }
}

fn with_images(message: &Message, images: &[ImageData]) -> Value {
    let mut parts = vec![json!({ "type": "text", "text": message.content.text() })];
    parts.extend(message.content.images().into_iter().map(image_part));
    parts.extend(images.iter().map(image_part));
    json!({ "role": "user", "content": parts })
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    #[instrument(skip(self, request), fields(provider = "openai", model = %request.model()))]
    async fn chat(&self, request: &ChatRequest) -> SimpleChatResult<ChatResponse> {
        let started = Instant::now();
        let payload = Self::build_payload(request);
        debug!(messages = request.messages().len(), images = request.images().len(), "Sending chat request");

        let http = self
            .client
            .post(endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&payload);

        let result: SimpleChatResult<ChatResponse> = match send_json("openai", http).await {
            Ok(raw) => Self::parse_response(raw).map_err(Into::into),
            Err(e) => Err(e.into()),
        };
        LlmMetrics::get().observe("openai", request.model(), Operation::Chat, started, &result);
        result
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
