//! Anthropic messages API.

mod client;
mod dto;

pub use client::ClaudeClient;
pub use dto::{ClaudeContentBlock, ClaudeMessageResponse};
