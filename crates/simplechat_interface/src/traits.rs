//! The provider capability trait.

use crate::{ChatRequest, ImageRequest};
use async_trait::async_trait;
use simplechat_core::{ChatResponse, ProviderKind};
use simplechat_error::{NotImplementedError, SimpleChatResult};

/// Capability set shared by all vendor clients.
///
/// `chat` issues exactly one HTTP request and never retries. Image
/// generation is optional: the default implementation reports
/// [`NotImplementedError`].
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends a chat completion request and normalizes the reply.
    async fn chat(&self, request: &ChatRequest) -> SimpleChatResult<ChatResponse>;

    /// Generates or edits an image.
    async fn generate_image(&self, _request: &ImageRequest) -> SimpleChatResult<ChatResponse> {
        Err(NotImplementedError::new(format!(
            "{} does not support image generation. Use the gemini provider for image generation.",
            self.provider_name()
        )))?
    }

    /// Which vendor this client talks to.
    fn provider(&self) -> ProviderKind;

    /// Provider name used in logs and metrics ("openai", "claude", "gemini").
    fn provider_name(&self) -> &'static str {
        match self.provider() {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Claude => "claude",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Base URL requests are sent to.
    fn base_url(&self) -> &str;
}
