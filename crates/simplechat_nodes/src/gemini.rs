//! Gemini image generation and editing nodes.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use simplechat_core::{ChatConfig, ImageData};
use simplechat_error::{
    BuilderError, ConfigError, ProviderError, ProviderErrorKind, SimpleChatResult,
};
use simplechat_interface::ImageRequest;
use simplechat_models::ProviderRegistry;
use tracing::{info, instrument};

/// Generated image plus any text the model returned with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ImageOutput {
    /// Generated or edited image
    image: ImageData,
    /// Accompanying text, possibly empty
    text: String,
}

fn require_gemini(config: &ChatConfig, node: &str) -> Result<(), ConfigError> {
    if config.provider().supports_image_generation() {
        Ok(())
    } else {
        Err(ConfigError::new(format!(
            "{} requires Gemini provider. Please use a Gemini config.",
            node
        )))
    }
}

async fn generate(
    registry: &ProviderRegistry,
    config: &ChatConfig,
    request: ImageRequest,
) -> SimpleChatResult<ImageOutput> {
    let provider = registry.resolve(config)?;
    let response = provider.generate_image(&request).await?;
    let (text, image) = response.into_parts();
    let image = image.ok_or_else(|| {
        ProviderError::new(ProviderErrorKind::NoImageReturned(
            provider.provider_name().to_string(),
        ))
    })?;
    info!(mime = %image.mime(), bytes = image.data().len(), "Image received");
    Ok(ImageOutput { image, text })
}

/// Text-to-image generation.
#[derive(Debug, Clone, Default)]
pub struct GeminiImageGenNode {
    registry: ProviderRegistry,
}

impl GeminiImageGenNode {
    /// Node using every compiled-in provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node resolving clients through `registry`.
    pub fn with_registry(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Generates an image from `prompt`.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] for non-Gemini configs, before any request is made.
    #[instrument(skip(self, config, prompt), fields(model = %config.model()))]
    pub async fn run(
        &self,
        config: &ChatConfig,
        prompt: &str,
        aspect_ratio: &str,
        size: &str,
    ) -> SimpleChatResult<ImageOutput> {
        require_gemini(config, "Gemini Image Gen")?;
        let request = ImageRequest::builder()
            .prompt(prompt)
            .model(config.model().clone())
            .aspect_ratio(Some(aspect_ratio.to_string()))
            .size(Some(size.to_string()))
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;
        generate(&self.registry, config, request).await
    }
}

/// Prompt-driven editing of an existing image.
///
/// No aspect ratio is sent, so the edit keeps the source proportions.
#[derive(Debug, Clone, Default)]
pub struct GeminiImageEditNode {
    registry: ProviderRegistry,
}

impl GeminiImageEditNode {
    /// Node using every compiled-in provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node resolving clients through `registry`.
    pub fn with_registry(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Edits `image` according to `prompt`.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] for non-Gemini configs, before any request is made.
    #[instrument(skip(self, config, image, prompt), fields(model = %config.model()))]
    pub async fn run(
        &self,
        config: &ChatConfig,
        image: &ImageData,
        prompt: &str,
        size: &str,
    ) -> SimpleChatResult<ImageOutput> {
        require_gemini(config, "Gemini Image Edit")?;
        let request = ImageRequest::builder()
            .prompt(prompt)
            .model(config.model().clone())
            .reference_image(Some(image.clone()))
            .aspect_ratio(None::<String>)
            .size(Some(size.to_string()))
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;
        generate(&self.registry, config, request).await
    }
}
