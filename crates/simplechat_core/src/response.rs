//! The unified provider response.

use crate::ImageData;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Normalized reply from any provider.
///
/// # Examples
///
/// ```
/// use simplechat_core::ChatResponse;
///
/// let response = ChatResponse::builder()
///     .text("Hello! How can I help?")
///     .build()
///     .unwrap();
///
/// assert_eq!(response.text(), "Hello! How can I help?");
/// assert!(response.image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatResponse {
    /// Concatenated text output
    text: String,
    /// Generated image, when the vendor returned one
    #[builder(default)]
    image: Option<ImageData>,
    /// Vendor payload as received
    #[builder(default)]
    raw: serde_json::Value,
}

impl ChatResponse {
    /// Creates a new builder for `ChatResponse`.
    pub fn builder() -> ChatResponseBuilder {
        ChatResponseBuilder::default()
    }

    /// Splits the response into its text and image.
    pub fn into_parts(self) -> (String, Option<ImageData>) {
        (self.text, self.image)
    }
}
