//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Speaker of a message.
///
/// # Examples
///
/// ```
/// use simplechat_core::Role;
///
/// assert_eq!(Role::Assistant.as_str(), "assistant");
/// assert_eq!(format!("{}", Role::System), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions and scenario context
    #[display("system")]
    System,
    /// The human side of the conversation
    #[display("user")]
    User,
    /// The model side of the conversation
    #[display("assistant")]
    Assistant,
}

impl Role {
    /// Wire name shared by the OpenAI and Anthropic formats.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
