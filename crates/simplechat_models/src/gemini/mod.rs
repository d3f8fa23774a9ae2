//! Google Gemini generateContent API, including image generation.

mod client;
mod dto;

pub use client::GeminiClient;
pub use dto::{GeminiCandidate, GeminiContent, GeminiInlineData, GeminiPart, GeminiResponse};
