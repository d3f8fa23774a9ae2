//! SimpleChat - LLM nodes for prompt pipelines
//!
//! SimpleChat bundles the pieces a prompt pipeline needs around an LLM call:
//! one chat interface over OpenAI, Claude and Gemini, mustache templating,
//! NoASS roleplay transcripts, lenient JSON extraction and the Anima prompt
//! router.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use simplechat::{ChatConfig, ChatInput, ChatNode, ProviderKind, Vars};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ChatConfig::new(
//!         ProviderKind::Claude,
//!         std::env::var("ANTHROPIC_API_KEY")?,
//!         "",
//!         "claude-3-5-haiku-latest",
//!     );
//!     let mut vars = Vars::new();
//!     vars.insert("name", "Ada");
//!
//!     let input = ChatInput::builder().prompt("Greet {{name}}.").vars(vars).build()?;
//!     let text = ChatNode::new().run(&config, &input).await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `openai` - OpenAI-compatible chat completions
//! - `claude` - Anthropic messages API
//! - `gemini` - Google Gemini chat and image generation
//! - `api` - Marker for tests that call the real APIs
//!
//! # Architecture
//!
//! - `simplechat_error` - Error types
//! - `simplechat_core` - Messages, configs, images and template vars
//! - `simplechat_interface` - `ChatProvider` trait and request types
//! - `simplechat_models` - Provider clients, settings, model catalog, metrics
//! - `simplechat_template` - Mustache renderer and NoASS formatter
//! - `simplechat_json` - Lenient JSON parsing, paths and var projection
//! - `simplechat_anima` - Anima field router and XY matrix tooling
//! - `simplechat_nodes` - Node entry points
//!
//! This crate (`simplechat`) re-exports everything for convenience.

#![forbid(unsafe_code)]

pub mod telemetry;

pub use simplechat_anima::*;
pub use simplechat_core::*;
pub use simplechat_error::*;
pub use simplechat_interface::*;
pub use simplechat_json::*;
pub use simplechat_models::*;
pub use simplechat_nodes::*;
pub use simplechat_template::*;
