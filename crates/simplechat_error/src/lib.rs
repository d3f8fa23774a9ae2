//! Error types for the SimpleChat library.
//!
//! This crate provides the foundation error types used throughout the SimpleChat crates.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind (or a message) with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The taxonomy maps onto how a failure should be reported to the host:
//! - [`ConfigError`] / [`NotImplementedError`]: fail fast, no work performed
//! - [`ProviderError`]: transport failures, non-2xx replies and 2xx replies
//!   missing the expected payload, each a distinct [`ProviderErrorKind`]
//! - [`JsonError`]: input-shape errors after all repair attempts
//!
//! # Examples
//!
//! ```
//! use simplechat_error::{ConfigError, SimpleChatResult};
//!
//! fn resolve() -> SimpleChatResult<()> {
//!     Err(ConfigError::new("Unknown provider: mistral"))?
//! }
//!
//! assert!(resolve().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod image;
mod json;
mod not_implemented;
mod provider;
mod template;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{SimpleChatError, SimpleChatErrorKind, SimpleChatResult};
pub use image::ImageError;
pub use json::{JsonError, JsonErrorKind};
pub use not_implemented::NotImplementedError;
pub use provider::{ProviderError, ProviderErrorKind};
pub use template::TemplateError;
