use crate::claude::ClaudeMessageResponse;
use crate::metrics::{LlmMetrics, Operation};
use crate::transport::{ANTHROPIC_VERSION, endpoint, image_target, send_json};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use simplechat_core::{
    ChatResponse, ContentPart, ImageData, Message, MessageContent, ProviderKind, Role,
};
use simplechat_error::{ProviderError, ProviderErrorKind, SimpleChatResult};
use simplechat_interface::{ChatProvider, ChatRequest};
use std::time::Instant;
use tracing::{debug, instrument};

/// Anthropic Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ClaudeClient {
    /// Creates a new Claude client.
    ///
    /// An empty `base_url` selects `https://api.anthropic.com/v1`.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.trim().is_empty() {
            ProviderKind::Claude.default_base_url().to_string()
        } else {
            base_url
        };
        debug!(base_url = %base_url, "Creating new Claude client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    /// Builds the `/messages` payload.
    ///
    /// System messages are lifted into the top-level `system` field and never
    /// appear in `messages`. Attached images become base64 blocks placed
    /// before the text of the trailing user message.
    pub fn build_payload(request: &ChatRequest) -> Value {
        let target = image_target(request.messages(), request.images());
        let mut system = Vec::new();
        let mut messages = Vec::new();

        for (i, message) in request.messages().iter().enumerate() {
            if message.role == Role::System {
                let text = message.content.text();
                if !text.is_empty() {
                    system.push(text);
                }
                continue;
            }
            if Some(i) == target {
                messages.push(with_images(message, request.images()));
            } else {
                messages.push(json!({
                    "role": message.role.as_str(),
                    "content": content_value(&message.content),
                }));
            }
        }

        let mut payload = json!({
            "model": request.model(),
            "messages": messages,
            "temperature": request.temperature(),
            "max_tokens": request.max_tokens(),
        });
        if !system.is_empty() {
            payload["system"] = json!(system.join("\n\n"));
        }
        if !request.stop().is_empty() {
            payload["stop_sequences"] = json!(request.stop());
        }
        payload
    }

    /// Concatenates all text blocks of the reply.
    pub fn parse_response(raw: Value) -> Result<ChatResponse, ProviderError> {
        let reply: ClaudeMessageResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Unexpected Claude response shape: {}",
                e
            )))
        })?;

        ChatResponse::builder()
            .text(reply.text())
            .raw(raw)
            .build()
            .map_err(|e| ProviderError::new(ProviderErrorKind::MalformedResponse(e.to_string())))
    }
}

fn image_block(image: &ImageData) -> Value {
    json!({
        "type": "image",
        "source": {
            "type": "base64",
            "media_type": image.mime(),
            "data": image.to_base64(),
        },
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
                    ContentPart::Image { image } => image_block(image),
                })
                .collect(),
        ),
    }
}

fn with_images(message: &Message, images: &[ImageData]) -> Value {
    let mut blocks: Vec<Value> = message
        .content
        .images()
        .into_iter()
        .chain(images.iter())
        .map(image_block)
        .collect();
    blocks.push(json!({ "type": "text", "text": message.content.text() }));
    json!({ "role": "user", "content": blocks })
}

impl std::fmt::Debug for ClaudeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatProvider for ClaudeClient {
    #[instrument(skip(self, request), fields(provider = "claude", model = %request.model()))]
    async fn chat(&self, request: &ChatRequest) -> SimpleChatResult<ChatResponse> {
        let started = Instant::now();
        let payload = Self::build_payload(request);
        debug!(messages = request.messages().len(), images = request.images().len(), "Sending chat request");

        let http = self
            .client
            .post(endpoint(&self.base_url, "messages"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload);

        let result: SimpleChatResult<ChatResponse> = match send_json("claude", http).await {
            Ok(raw) => Self::parse_response(raw).map_err(Into::into),
            Err(e) => Err(e.into()),
        };
        LlmMetrics::get().observe("claude", request.model(), Operation::Chat, started, &result);
        result
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
