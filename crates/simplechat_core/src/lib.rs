//! Core data types for the SimpleChat node library.
//!
//! This crate provides the value objects shared by providers, formatters and
//! nodes: the connection config, role-tagged messages, images, the unified
//! chat response, and the mustache variable map.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod media;
mod message;
mod provider;
mod response;
mod role;
mod vars;

pub use config::ChatConfig;
pub use media::ImageData;
pub use message::{ContentPart, Message, MessageContent};
pub use provider::ProviderKind;
pub use response::{ChatResponse, ChatResponseBuilder};
pub use role::Role;
pub use vars::{VarValue, Vars};
