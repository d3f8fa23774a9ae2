//! Prompt text shaping for SimpleChat.
//!
//! - [`render`]: single-pass `{{ key }}` substitution from a [`Vars`](simplechat_core::Vars) map
//! - [`noass`]: the "no assistant turns" roleplay layout, where the whole
//!   story so far is sent as one assistant message for the model to continue

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod mustache;
pub mod noass;

pub use mustache::{placeholders, render};
