//! Trait definitions for the SimpleChat provider layer.
//!
//! Every vendor client implements [`ChatProvider`]. Requests are described by
//! the [`ChatRequest`] and [`ImageRequest`] value objects so callers never see
//! a vendor wire format.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod request;
mod traits;

pub use request::{ChatRequest, ChatRequestBuilder, ImageRequest, ImageRequestBuilder};
pub use traits::ChatProvider;
