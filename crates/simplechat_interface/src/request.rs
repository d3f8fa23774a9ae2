//! Provider-neutral request value objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use simplechat_core::{ImageData, Message};

/// A chat completion request.
///
/// # Examples
///
/// ```
/// use simplechat_core::Message;
/// use simplechat_interface::ChatRequest;
///
/// let request = ChatRequest::builder()
///     .messages(vec![Message::system("Be brief."), Message::user("Hello")])
///     .model("gpt-4o-mini")
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.temperature(), 1.0);
/// assert_eq!(*request.max_tokens(), 2048);
/// assert!(request.images().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Ordered conversation
    messages: Vec<Message>,
    /// Model identifier
    model: String,
    /// Sampling temperature
    #[builder(default = "1.0")]
    temperature: f64,
    /// Maximum tokens to generate
    #[builder(default = "2048")]
    max_tokens: u32,
    /// Images attached to the last message when it has role user
    #[builder(default)]
    images: Vec<ImageData>,
    /// Stop strings, sent only when non-empty
    #[builder(default)]
    stop: Vec<String>,
    /// Ask Gemini for image output alongside text
    #[builder(default)]
    enable_image_output: bool,
}

impl ChatRequest {
    /// Creates a new builder for `ChatRequest`.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

/// An image generation or edit request.
///
/// A `reference_image` turns generation into an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Text prompt
    prompt: String,
    /// Model identifier
    model: String,
    /// Image to edit
    #[builder(default)]
    reference_image: Option<ImageData>,
    /// Aspect ratio such as "16:9"; omitted when `None`
    #[builder(default = "Some(\"1:1\".to_string())")]
    aspect_ratio: Option<String>,
    /// Output size such as "1K"; omitted when `None`
    #[builder(default = "Some(\"1K\".to_string())")]
    size: Option<String>,
}

impl ImageRequest {
    /// Creates a new builder for `ImageRequest`.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}
