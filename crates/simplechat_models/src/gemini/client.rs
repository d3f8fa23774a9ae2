use crate::gemini::GeminiResponse;
use crate::metrics::{LlmMetrics, Operation};
use crate::transport::{endpoint, image_target, send_json};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use simplechat_core::{ChatResponse, ContentPart, ImageData, MessageContent, ProviderKind, Role};
use simplechat_error::{ProviderError, ProviderErrorKind, SimpleChatResult};
use simplechat_interface::{ChatProvider, ChatRequest, ImageRequest};
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Google Gemini API client with image generation support.
///
/// The API key travels as the `key` query parameter.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// An empty `base_url` selects `https://generativelanguage.googleapis.com/v1beta`.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.trim().is_empty() {
            ProviderKind::Gemini.default_base_url().to_string()
        } else {
            base_url
        };
        debug!(base_url = %base_url, "Creating new Gemini client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        endpoint(&self.base_url, &format!("models/{}:generateContent", model))
    }

    /// Builds the generateContent payload for a chat request.
    ///
    /// System messages become `systemInstruction`; everything else maps to
    /// `contents` with roles `user` or `model`. Attached images precede the
    /// text of the trailing user entry as inline data.
    pub fn build_payload(request: &ChatRequest) -> Value {
        let target = image_target(request.messages(), request.images());
        let mut system = Vec::new();
        let mut contents = Vec::new();

        for (i, message) in request.messages().iter().enumerate() {
            if message.role == Role::System {
                let text = message.content.text();
                if !text.is_empty() {
                    system.push(text);
                }
                continue;
            }
            let role = if message.role == Role::User {
                "user"
            } else {
                "model"
            };
            let mut parts = content_parts(&message.content);
            if Some(i) == target {
                let images: Vec<Value> = request.images().iter().map(inline_part).collect();
                parts.splice(0..0, images);
            }
            contents.push(json!({ "role": role, "parts": parts }));
        }

        let mut generation_config = json!({
            "temperature": request.temperature(),
            "maxOutputTokens": request.max_tokens(),
        });
        if !request.stop().is_empty() {
            generation_config["stopSequences"] = json!(request.stop());
        }
        if *request.enable_image_output() {
            generation_config["responseModalities"] = json!(["TEXT", "IMAGE"]);
        }

        let mut payload = json!({
            "contents": contents,
            "generationConfig": generation_config,
        });
        if !system.is_empty() {
            payload["systemInstruction"] = json!({ "parts": [{ "text": system.join("\n\n") }] });
        }
        payload
    }

    /// Builds the generateContent payload for an image generation or edit.
    pub fn build_image_payload(request: &ImageRequest) -> Value {
        let mut parts = Vec::new();
        if let Some(reference) = request.reference_image() {
            parts.push(inline_part(reference));
        }
        parts.push(json!({ "text": request.prompt() }));

        let mut generation_config = json!({ "responseModalities": ["TEXT", "IMAGE"] });
        let mut image_config = serde_json::Map::new();
        if let Some(aspect_ratio) = request.aspect_ratio().as_deref().filter(|s| !s.is_empty()) {
            image_config.insert("aspectRatio".to_string(), json!(aspect_ratio));
        }
        if let Some(size) = request.size().as_deref().filter(|s| !s.is_empty()) {
            image_config.insert("imageSize".to_string(), json!(size));
        }
        if !image_config.is_empty() {
            generation_config["imageConfig"] = Value::Object(image_config);
        }

        json!({
            "contents": [{ "parts": parts }],
            "generationConfig": generation_config,
        })
    }

    /// Scans the first candidate: text parts concatenate, the last inline
    /// part with an `image/*` MIME type becomes the image.
    pub fn parse_response(raw: Value) -> Result<ChatResponse, ProviderError> {
        let reply: GeminiResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Unexpected Gemini response shape: {}",
                e
            )))
        })?;

        let mut text = String::new();
        let mut image = None;
        if let Some(candidate) = reply.candidates().first() {
            for part in candidate.content().parts() {
                if let Some(t) = part.text() {
                    text.push_str(t);
                } else if let Some(inline) = part.inline_data() {
                    if inline.mime_type().starts_with("image/") {
                        image = Some(ImageData::from_base64(
                            inline.mime_type().clone(),
                            inline.data(),
                        )?);
                    }
                }
            }
        }

        ChatResponse::builder()
            .text(text)
            .image(image)
            .raw(raw)
            .build()
            .map_err(|e| ProviderError::new(ProviderErrorKind::MalformedResponse(e.to_string())))
    }

    /// Like [`parse_response`](Self::parse_response) but requires an image.
    pub fn parse_image_response(raw: Value) -> Result<ChatResponse, ProviderError> {
        let response = Self::parse_response(raw)?;
        if response.image().is_none() {
            warn!(text = %response.text(), "Gemini returned no image part");
            return Err(ProviderError::new(ProviderErrorKind::NoImageReturned(
                "Gemini".to_string(),
            )));
        }
        Ok(response)
    }
}

fn inline_part(image: &ImageData) -> Value {
    json!({
        "inline_data": {
            "mime_type": image.mime(),
            "data": image.to_base64(),
        }
    })
}

fn content_parts(content: &MessageContent) -> Vec<Value> {
    match content {
        MessageContent::Text(text) => vec![json!({ "text": text })],
        MessageContent::Parts(parts) => parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => json!({ "text": text }),
                ContentPart::Image { image } => inline_part(image),
            })
            .collect(),
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatProvider for GeminiClient {
    #[instrument(skip(self, request), fields(provider = "gemini", model = %request.model()))]
    async fn chat(&self, request: &ChatRequest) -> SimpleChatResult<ChatResponse> {
        let started = Instant::now();
        let payload = Self::build_payload(request);
        debug!(messages = request.messages().len(), images = request.images().len(), "Sending chat request");

        let http = self
            .client
            .post(self.generate_url(request.model()))
            .query(&[("key", &self.api_key)])
            .json(&payload);

        let result: SimpleChatResult<ChatResponse> = match send_json("gemini", http).await {
            Ok(raw) => Self::parse_response(raw).map_err(Into::into),
            Err(e) => Err(e.into()),
        };
        LlmMetrics::get().observe("gemini", request.model(), Operation::Chat, started, &result);
        result
    }

    #[instrument(
        skip(self, request),
        fields(provider = "gemini", model = %request.model(), edit = request.reference_image().is_some())
    )]
    async fn generate_image(&self, request: &ImageRequest) -> SimpleChatResult<ChatResponse> {
        let started = Instant::now();
        let payload = Self::build_image_payload(request);
        debug!("Sending image generation request");

        let http = self
            .client
            .post(self.generate_url(request.model()))
            .query(&[("key", &self.api_key)])
            .json(&payload);

        let result: SimpleChatResult<ChatResponse> = match send_json("gemini", http).await {
            Ok(raw) => Self::parse_image_response(raw).map_err(Into::into),
            Err(e) => Err(e.into()),
        };
        LlmMetrics::get().observe("gemini", request.model(), Operation::Image, started, &result);
        result
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
