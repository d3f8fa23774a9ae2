//! Handlers for the commands that call a provider.

use simplechat_core::ProviderKind;
use simplechat_models::{ModelCatalog, SimpleChatSettings};
use simplechat_nodes::{
    ChatImageNode, ChatInput, ChatNode, GeminiImageEditNode, GeminiImageGenNode, NoassChatNode,
    NoassInput,
};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::commands::ProviderArgs;
use super::input::{CliResult, provider_kind, read_image, resolve_config, text_arg, var_args};

/// Options for `simplechat chat`.
#[derive(Debug)]
pub struct ChatOptions {
    /// Provider selection
    pub provider: ProviderArgs,
    /// User prompt
    pub prompt: String,
    /// System prompt
    pub system: String,
    /// `key=value` variables
    pub vars: Vec<String>,
    /// Optional image attachment
    pub image: Option<PathBuf>,
    /// Sampling temperature override
    pub temperature: Option<f64>,
    /// Token limit override
    pub max_tokens: Option<u32>,
}

/// Sends one prompt and prints the reply.
#[instrument(skip_all)]
pub async fn run_chat(options: ChatOptions) -> CliResult<()> {
    let settings = SimpleChatSettings::load()?;
    let config = resolve_config(&options.provider, &settings, ProviderKind::OpenAi)?;

    let input = ChatInput::builder()
        .prompt(text_arg(&options.prompt)?)
        .system(text_arg(&options.system)?)
        .vars(var_args(&options.vars))
        .temperature(options.temperature.unwrap_or(settings.defaults.temperature))
        .max_tokens(options.max_tokens.unwrap_or(settings.defaults.max_tokens))
        .build()?;

    let text = match &options.image {
        Some(path) => {
            let image = read_image(path)?;
            ChatImageNode::new().run(&config, &input, &image).await?
        }
        None => ChatNode::new().run(&config, &input).await?,
    };
    println!("{}", text);
    Ok(())
}

/// Options for `simplechat noass`.
#[derive(Debug)]
pub struct NoassOptions {
    /// Provider selection
    pub provider: ProviderArgs,
    /// The user's action
    pub user_action: String,
    /// Scenario text or `@path`
    pub scenario: String,
    /// Reply prefill
    pub prefill: String,
    /// Transcript file
    pub history: Option<PathBuf>,
    /// Optional image
    pub image: Option<PathBuf>,
    /// User speaker name override
    pub user_name: Option<String>,
    /// Character speaker name override
    pub char_name: Option<String>,
    /// Sampling temperature override
    pub temperature: Option<f64>,
    /// Token limit override
    pub max_tokens: Option<u32>,
}

/// Plays one NoASS turn, printing the reply and saving the transcript.
#[instrument(skip_all)]
pub async fn run_noass(options: NoassOptions) -> CliResult<()> {
    let settings = SimpleChatSettings::load()?;
    let config = resolve_config(&options.provider, &settings, ProviderKind::OpenAi)?;
    let defaults = &settings.defaults;

    let history = match &options.history {
        Some(path) if path.exists() => std::fs::read_to_string(path)?,
        _ => String::new(),
    };
    let image = options.image.as_deref().map(read_image).transpose()?;

    let input = NoassInput::builder()
        .scenario(text_arg(&options.scenario)?)
        .user_action(options.user_action)
        .prefill(options.prefill)
        .history(history)
        .image(image)
        .user_name(options.user_name.unwrap_or_else(|| defaults.user_name.clone()))
        .char_name(options.char_name.unwrap_or_else(|| defaults.char_name.clone()))
        .temperature(options.temperature.unwrap_or(defaults.temperature))
        .max_tokens(options.max_tokens.unwrap_or(defaults.max_tokens))
        .build()?;

    let output = NoassChatNode::new().run(&config, &input).await?;
    println!("{}", output.text());

    if let Some(path) = &options.history {
        std::fs::write(path, output.history())?;
        info!(path = %path.display(), "Transcript saved");
    }
    Ok(())
}

/// Options for `simplechat image`.
#[derive(Debug)]
pub struct ImageOptions {
    /// Provider selection
    pub provider: ProviderArgs,
    /// Image prompt
    pub prompt: String,
    /// Output PNG path
    pub output: PathBuf,
    /// Reference image for edits
    pub edit: Option<PathBuf>,
    /// Aspect ratio for generation
    pub aspect_ratio: String,
    /// Output size
    pub size: String,
}

/// Generates or edits an image and writes it to disk.
#[instrument(skip_all, fields(output = %options.output.display()))]
pub async fn run_image(options: ImageOptions) -> CliResult<()> {
    let settings = SimpleChatSettings::load()?;
    let config = resolve_config(&options.provider, &settings, ProviderKind::Gemini)?;
    let prompt = text_arg(&options.prompt)?;

    let output = match &options.edit {
        Some(path) => {
            let source = read_image(path)?;
            GeminiImageEditNode::new()
                .run(&config, &source, &prompt, &options.size)
                .await?
        }
        None => {
            GeminiImageGenNode::new()
                .run(&config, &prompt, &options.aspect_ratio, &options.size)
                .await?
        }
    };

    write_image(&options.output, output.image().data())?;
    if !output.text().trim().is_empty() {
        println!("{}", output.text());
    }
    Ok(())
}

fn write_image(path: &Path, data: &[u8]) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    info!(path = %path.display(), bytes = data.len(), "Image written");
    Ok(())
}

/// Prints models for one provider, or the predefined lists of all of them.
#[instrument(skip(api_key))]
pub async fn list_models(
    provider: Option<&str>,
    api_key: Option<&str>,
    base_url: &str,
    offline: bool,
) -> CliResult<()> {
    let settings = SimpleChatSettings::load()?;
    let catalog = ModelCatalog::new(settings.clone());

    let models = match provider {
        None => catalog.all_predefined(),
        Some(name) => {
            let kind = provider_kind(name)?;
            if offline {
                catalog.predefined(kind)
            } else {
                let key = api_key
                    .map(str::to_string)
                    .or_else(|| settings.api_key(kind))
                    .unwrap_or_default();
                catalog.list(kind.as_ref(), &key, base_url).await
            }
        }
    };

    for model in models {
        println!("{}", model);
    }
    Ok(())
}
