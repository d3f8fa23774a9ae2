//! LLM provider clients for SimpleChat.
//!
//! Each vendor client sits behind its own feature flag (all enabled by
//! default) and implements [`ChatProvider`](simplechat_interface::ChatProvider):
//!
//! - **OpenAI** and OpenAI-compatible servers - `openai` feature
//! - **Claude** (Anthropic) - `claude` feature
//! - **Gemini** (Google), the only client with image generation - `gemini` feature
//!
//! Clients expose their request shaping (`build_payload`) and response
//! normalization (`parse_response`) as plain functions; the async `chat`
//! call is a single HTTP round trip between the two.
//!
//! # Example
//!
//! ```no_run
//! use simplechat_core::{ChatConfig, Message, ProviderKind};
//! use simplechat_interface::ChatRequest;
//! use simplechat_models::provider_for;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChatConfig::new(ProviderKind::OpenAi, "sk-...", "", "gpt-4o-mini");
//! let provider = provider_for(&config)?;
//! let request = ChatRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .model(config.model().clone())
//!     .build()?;
//! let response = provider.chat(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod metrics;
mod registry;
mod settings;
mod transport;

pub use catalog::{ModelCatalog, parse_claude_models, parse_gemini_models, parse_openai_models};
pub use metrics::{LlmMetrics, Operation, classify_error};
pub use registry::{ProviderConstructor, ProviderRegistry, provider_for};
pub use settings::{DefaultSettings, ProviderSettings, SimpleChatSettings};

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "claude")]
mod claude;

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "openai")]
pub use openai::{OpenAiChoice, OpenAiClient, OpenAiCompletion, OpenAiReplyMessage};

#[cfg(feature = "claude")]
pub use claude::{ClaudeClient, ClaudeContentBlock, ClaudeMessageResponse};

#[cfg(feature = "gemini")]
pub use gemini::{
    GeminiCandidate, GeminiClient, GeminiContent, GeminiInlineData, GeminiPart, GeminiResponse,
};
