//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, ImageError, JsonError, NotImplementedError, ProviderError,
    TemplateError,
};

/// Every failure a SimpleChat operation can surface to the host.
///
/// # Examples
///
/// ```
/// use simplechat_error::{SimpleChatError, ConfigError};
///
/// let err: SimpleChatError = ConfigError::new("Unknown provider: foo").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SimpleChatErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Capability not offered by the provider
    #[from(NotImplementedError)]
    NotImplemented(NotImplementedError),
    /// Vendor API error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// JSON input-shape error
    #[from(JsonError)]
    Json(JsonError),
    /// Template error
    #[from(TemplateError)]
    Template(TemplateError),
    /// Image processing error
    #[from(ImageError)]
    Image(ImageError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// SimpleChat error with kind discrimination.
///
/// # Examples
///
/// ```
/// use simplechat_error::{SimpleChatErrorKind, SimpleChatResult, NotImplementedError};
///
/// fn generate() -> SimpleChatResult<()> {
///     Err(NotImplementedError::new("image generation"))?
/// }
///
/// let err = generate().unwrap_err();
/// assert!(matches!(err.kind(), SimpleChatErrorKind::NotImplemented(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("SimpleChat Error: {}", _0)]
pub struct SimpleChatError(Box<SimpleChatErrorKind>);

impl SimpleChatError {
    /// Create a new error from a kind.
    pub fn new(kind: SimpleChatErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SimpleChatErrorKind {
        &self.0
    }

    /// The provider error kind, when this is a vendor failure.
    pub fn provider_kind(&self) -> Option<&crate::ProviderErrorKind> {
        match self.kind() {
            SimpleChatErrorKind::Provider(e) => Some(e.kind()),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to SimpleChatErrorKind
impl<T> From<T> for SimpleChatError
where
    T: Into<SimpleChatErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for SimpleChat operations.
pub type SimpleChatResult<T> = std::result::Result<T, SimpleChatError>;
