//! Provider (vendor API) error types.

/// Failure conditions of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// The request never produced an HTTP status (DNS, TLS, connection reset, ...)
    #[display("Request failed: {}", _0)]
    Transport(String),
    /// The vendor answered with a non-2xx status
    #[display("{} API error {}: {}", provider, status, body)]
    Api {
        /// Provider name ("openai", "claude", "gemini")
        provider: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
    /// 2xx reply whose body could not be decoded or lacks a required field
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// Image generation succeeded at the protocol level but no image part came back
    #[display("{} did not return an image. Try a different prompt or model.", _0)]
    NoImageReturned(String),
    /// Inline image data could not be decoded
    #[display("Image decode failed: {}", _0)]
    ImageDecode(String),
}

impl ProviderErrorKind {
    /// HTTP status carried by the error, if the vendor answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderErrorKind::Transport(_) => "transport",
            ProviderErrorKind::Api { status: 401 | 403, .. } => "auth",
            ProviderErrorKind::Api { status: 429, .. } => "rate_limit",
            ProviderErrorKind::Api { .. } => "api",
            ProviderErrorKind::MalformedResponse(_) => "malformed_response",
            ProviderErrorKind::NoImageReturned(_) => "no_image",
            ProviderErrorKind::ImageDecode(_) => "image_decode",
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use simplechat_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Api {
///     provider: "openai".to_string(),
///     status: 401,
///     body: "invalid key".to_string(),
/// });
/// assert_eq!(err.kind.status(), Some(401));
/// assert!(format!("{}", err).contains("invalid key"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ProviderErrorKind {
        &self.kind
    }
}
