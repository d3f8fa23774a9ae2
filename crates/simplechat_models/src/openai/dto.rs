//! OpenAI response data transfer objects.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Assistant message inside a completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiReplyMessage {
    /// Generated text; `null` for refusals and tool calls
    #[serde(default)]
    content: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiChoice {
    /// The generated message
    message: OpenAiReplyMessage,
}

/// Chat completion reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiCompletion {
    /// Completion choices, first one is used
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}
