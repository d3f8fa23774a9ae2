//! Encoded image payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use simplechat_error::{ProviderError, ProviderErrorKind};

/// An encoded image (PNG, JPEG, ...) together with its MIME type.
///
/// The host owns pixel buffers; SimpleChat only moves encoded bytes between
/// the host and vendor APIs.
///
/// # Examples
///
/// ```
/// use simplechat_core::ImageData;
///
/// let image = ImageData::png(vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(image.to_base64(), "iVBORw==");
/// assert_eq!(image.data_uri(), "data:image/png;base64,iVBORw==");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ImageData {
    /// MIME type, e.g. "image/png"
    mime: String,
    /// Encoded image bytes
    data: Vec<u8>,
}

impl ImageData {
    /// Wraps encoded bytes with an explicit MIME type.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Wraps PNG-encoded bytes.
    pub fn png(data: Vec<u8>) -> Self {
        Self::new("image/png", data)
    }

    /// Decodes a base64 payload as returned in vendor inline-data parts.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorKind::ImageDecode`] when the payload is not valid base64.
    pub fn from_base64(mime: impl Into<String>, encoded: &str) -> Result<Self, ProviderError> {
        let data = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ProviderError::new(ProviderErrorKind::ImageDecode(e.to_string())))?;
        Ok(Self::new(mime, data))
    }

    /// Standard base64 encoding of the image bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// `data:` URI suitable for OpenAI `image_url` parts.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.to_base64())
    }
}
