//! OpenAI and OpenAI-compatible chat completion APIs.

mod client;
mod dto;

pub use client::OpenAiClient;
pub use dto::{OpenAiChoice, OpenAiCompletion, OpenAiReplyMessage};
