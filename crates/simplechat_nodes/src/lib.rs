//! Node entry points.
//!
//! Each node is one unit of work a host graph can invoke: a single provider
//! call or a small text, JSON or image transformation. Nodes that talk to a
//! provider resolve their client through a
//! [`ProviderRegistry`](simplechat_models::ProviderRegistry), so hosts and
//! tests can substitute clients.
//!
//! # Example
//!
//! ```no_run
//! use simplechat_core::{ChatConfig, ProviderKind, Vars};
//! use simplechat_nodes::{ChatInput, ChatNode};
//!
//! # async fn run() -> simplechat_error::SimpleChatResult<()> {
//! let config = ChatConfig::new(ProviderKind::OpenAi, "sk-...", "", "gpt-4o-mini");
//! let mut vars = Vars::new();
//! vars.insert("topic", "tides");
//!
//! let input = ChatInput::builder()
//!     .prompt("Explain {{topic}} in one sentence.")
//!     .vars(vars)
//!     .build()
//!     .unwrap();
//! let text = ChatNode::new().run(&config, &input).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod gemini;
mod grid;
mod json;
mod mustache;
mod noass;
mod text_list;

pub use chat::{ChatImageNode, ChatInput, ChatInputBuilder, ChatNode};
pub use gemini::{GeminiImageEditNode, GeminiImageGenNode, ImageOutput};
pub use grid::{ImageGridNode, MAX_COLUMNS, MAX_PADDING, PadColor};
pub use json::{
    JsonParseNode, JsonParseOutput, JsonToVarsNode, PromptUnpackNode, PromptUnpackOutput,
};
pub use mustache::{MustacheRenderNode, MustacheVarNode};
pub use noass::{NoassChatNode, NoassInput, NoassInputBuilder, NoassOutput};
pub use text_list::{SplitMode, TextListNode};
