//! Argument and file helpers shared by the command handlers.

use image::ImageFormat;
use simplechat_core::{ChatConfig, ImageData, ProviderKind, Vars};
use simplechat_error::ConfigError;
use simplechat_json::parse_overrides;
use simplechat_models::SimpleChatSettings;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use super::commands::ProviderArgs;

/// Error type of the command handlers.
pub type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Reads a file, or stdin when `path` is `-`.
pub fn read_text(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Expands `@path` arguments to the file's contents.
pub fn text_arg(value: &str) -> CliResult<String> {
    match value.strip_prefix('@') {
        Some(path) => read_text(Path::new(path)),
        None => Ok(value.to_string()),
    }
}

/// Loads an image file, guessing its MIME type from the extension.
pub fn read_image(path: &Path) -> CliResult<ImageData> {
    let data = std::fs::read(path)?;
    let mime = ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("image/png");
    debug!(path = %path.display(), mime, bytes = data.len(), "Loaded image");
    Ok(ImageData::new(mime, data))
}

/// Collects repeated `key=value` arguments into template variables.
pub fn var_args(args: &[String]) -> Vars {
    let mut vars = Vars::new();
    for arg in args {
        for (key, value) in parse_overrides(arg) {
            vars.insert(key, value);
        }
    }
    vars
}

/// Parses a provider name.
pub fn provider_kind(name: &str) -> Result<ProviderKind, ConfigError> {
    ProviderKind::from_str(name.trim())
        .map_err(|_| ConfigError::new(format!("Unknown provider: {}", name)))
}

/// Builds a chat config from flags, falling back to settings.
///
/// # Errors
///
/// A [`ConfigError`] for an unknown provider, or when no model or API key
/// can be found.
pub fn resolve_config(
    args: &ProviderArgs,
    settings: &SimpleChatSettings,
    default_provider: ProviderKind,
) -> Result<ChatConfig, ConfigError> {
    let kind = match &args.provider {
        Some(name) => provider_kind(name)?,
        None => default_provider,
    };

    let model = match &args.model {
        Some(model) => model.clone(),
        None => settings.models(kind).first().cloned().ok_or_else(|| {
            ConfigError::new(format!("No model given and none predefined for {}", kind))
        })?,
    };

    let api_key = args
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| settings.api_key(kind))
        .ok_or_else(|| {
            ConfigError::new(format!(
                "No API key for {}. Pass --api-key or set the provider's api_key_env variable.",
                kind
            ))
        })?;

    let base_url = if args.base_url.trim().is_empty() {
        settings.base_url(kind)
    } else {
        args.base_url.clone()
    };

    debug!(provider = %kind, %model, %base_url, "Resolved chat config");
    Ok(ChatConfig::new(kind, api_key, base_url, model))
}
