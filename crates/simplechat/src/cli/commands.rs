//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// SimpleChat - LLM chat, templating and prompt JSON tools
#[derive(Parser, Debug)]
#[command(name = "simplechat")]
#[command(about = "LLM chat, templating and prompt JSON tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Provider selection shared by the commands that call an LLM.
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Provider name (openai, claude, gemini)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model identifier; defaults to the first predefined model
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key; defaults to the provider's `api_key_env` variable
    #[arg(long, env = "SIMPLECHAT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL override
    #[arg(long, default_value = "")]
    pub base_url: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one prompt, optionally with a system prompt and an image
    Chat {
        #[command(flatten)]
        provider: ProviderArgs,

        /// User prompt (mustache placeholders allowed)
        prompt: String,

        /// System prompt
        #[arg(short, long, default_value = "")]
        system: String,

        /// Template variable as key=value (repeatable)
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,

        /// Image file to attach to the prompt
        #[arg(long)]
        image: Option<PathBuf>,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f64>,

        /// Maximum tokens to generate
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// Play one NoASS roleplay turn
    Noass {
        #[command(flatten)]
        provider: ProviderArgs,

        /// The user's action or dialogue
        user_action: String,

        /// Scenario text, or @path to read it from a file
        #[arg(long, default_value = "")]
        scenario: String,

        /// Text the reply must start with
        #[arg(long, default_value = "")]
        prefill: String,

        /// Transcript file; read before the turn and rewritten after it
        #[arg(long)]
        history: Option<PathBuf>,

        /// Image file forwarded with the request
        #[arg(long)]
        image: Option<PathBuf>,

        /// User speaker name
        #[arg(long)]
        user_name: Option<String>,

        /// Character speaker name
        #[arg(long)]
        char_name: Option<String>,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f64>,

        /// Maximum tokens to generate
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// Generate or edit an image with Gemini
    Image {
        #[command(flatten)]
        provider: ProviderArgs,

        /// Image prompt
        prompt: String,

        /// Where to write the PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Reference image to edit instead of generating from scratch
        #[arg(long)]
        edit: Option<PathBuf>,

        /// Aspect ratio (ignored when editing)
        #[arg(long, default_value = "1:1")]
        aspect_ratio: String,

        /// Output size (1K, 2K, 4K)
        #[arg(long, default_value = "1K")]
        size: String,
    },

    /// List models for a provider
    Models {
        /// Provider name (openai, claude, gemini); every provider when omitted
        provider: Option<String>,

        /// API key for a live lookup; defaults to the provider's `api_key_env` variable
        #[arg(long)]
        api_key: Option<String>,

        /// Base URL override
        #[arg(long, default_value = "")]
        base_url: String,

        /// Skip the live lookup and print the predefined list
        #[arg(long)]
        offline: bool,
    },

    /// Render a mustache template
    Render {
        /// Template file, or - for stdin
        #[arg(default_value = "-")]
        template: PathBuf,

        /// Template variable as key=value (repeatable)
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,

        /// JSON object file whose values become variables
        #[arg(long)]
        vars_json: Option<PathBuf>,

        /// Remove placeholders that have no value
        #[arg(long)]
        drop_unmatched: bool,
    },

    /// Extract values from LLM-produced JSON
    Json {
        /// JSON file, or - for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Paths such as `a.b[0].c`
        paths: Vec<String>,

        /// Value printed for missing paths
        #[arg(long, default_value = "")]
        default: String,

        /// Output mode
        #[arg(long, value_enum, default_value_t = JsonOutput::Values)]
        output: JsonOutput,

        /// Parse the text as-is instead of taking the first code fence
        #[arg(long)]
        no_strip_fence: bool,
    },

    /// Route an Anima prompt JSON into fields and prompts
    Anima {
        /// JSON file, or - for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Field to lock (repeatable)
        #[arg(long, value_name = "FIELD")]
        lock: Vec<String>,

        /// Field override as field=value (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        overrides: Vec<String>,

        /// Output mode
        #[arg(long, value_enum, default_value_t = AnimaOutput::Prompts)]
        output: AnimaOutput,

        /// Parse the text as-is instead of taking the first code fence
        #[arg(long)]
        no_strip_fence: bool,
    },
}

/// What `json` prints.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonOutput {
    /// One value per path, one per line
    Values,
    /// Flattened template variables as a JSON object
    Vars,
    /// Typed image prompt parameters
    Unpack,
}

/// What `anima` prints.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimaOutput {
    /// Positive and negative prompts
    Prompts,
    /// Every routed field
    Fields,
    /// The updated JSON object
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_collects_repeated_vars() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "simplechat",
            "chat",
            "--provider",
            "claude",
            "--var",
            "name=Ada",
            "--var",
            "topic=tides",
            "Hi {{name}}",
        ])?;
        let Commands::Chat {
            provider, vars, prompt, ..
        } = cli.command
        else {
            anyhow::bail!("expected chat");
        };
        assert_eq!(provider.provider.as_deref(), Some("claude"));
        assert_eq!(vars, vec!["name=Ada", "topic=tides"]);
        assert_eq!(prompt, "Hi {{name}}");
        Ok(())
    }

    #[test]
    fn image_requires_output() {
        assert!(Cli::try_parse_from(["simplechat", "image", "a cat"]).is_err());
    }

    #[test]
    fn anima_defaults() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["simplechat", "-v", "anima", "--lock", "artist"])?;
        assert!(cli.verbose);
        let Commands::Anima {
            input,
            lock,
            output,
            no_strip_fence,
            ..
        } = cli.command
        else {
            anyhow::bail!("expected anima");
        };
        assert_eq!(input, PathBuf::from("-"));
        assert_eq!(lock, vec!["artist"]);
        assert_eq!(output, AnimaOutput::Prompts);
        assert!(!no_strip_fence);
        Ok(())
    }
}
