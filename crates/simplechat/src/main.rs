//! SimpleChat CLI binary.
//!
//! This binary exposes the SimpleChat nodes on the command line:
//! - Chat, NoASS roleplay turns and Gemini image generation
//! - Model listing
//! - Template rendering, JSON extraction and Anima routing

use clap::Parser;
use simplechat::telemetry::init_console_telemetry;

mod cli;

#[tokio::main]
async fn main() -> cli::CliResult<()> {
    use cli::{
        ChatOptions, Cli, Commands, ImageOptions, NoassOptions, extract_json, list_models,
        render_template, route_anima, run_chat, run_image, run_noass,
    };

    // API keys may live in .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_console_telemetry(cli.verbose, cli.log_json)?;

    match cli.command {
        Commands::Chat {
            provider,
            prompt,
            system,
            vars,
            image,
            temperature,
            max_tokens,
        } => {
            run_chat(ChatOptions {
                provider,
                prompt,
                system,
                vars,
                image,
                temperature,
                max_tokens,
            })
            .await?;
        }

        Commands::Noass {
            provider,
            user_action,
            scenario,
            prefill,
            history,
            image,
            user_name,
            char_name,
            temperature,
            max_tokens,
        } => {
            run_noass(NoassOptions {
                provider,
                user_action,
                scenario,
                prefill,
                history,
                image,
                user_name,
                char_name,
                temperature,
                max_tokens,
            })
            .await?;
        }

        Commands::Image {
            provider,
            prompt,
            output,
            edit,
            aspect_ratio,
            size,
        } => {
            run_image(ImageOptions {
                provider,
                prompt,
                output,
                edit,
                aspect_ratio,
                size,
            })
            .await?;
        }

        Commands::Models {
            provider,
            api_key,
            base_url,
            offline,
        } => {
            list_models(provider.as_deref(), api_key.as_deref(), &base_url, offline).await?;
        }

        Commands::Render {
            template,
            vars,
            vars_json,
            drop_unmatched,
        } => {
            render_template(&template, &vars, vars_json.as_deref(), drop_unmatched)?;
        }

        Commands::Json {
            input,
            paths,
            default,
            output,
            no_strip_fence,
        } => {
            extract_json(&input, &paths, &default, output, !no_strip_fence)?;
        }

        Commands::Anima {
            input,
            lock,
            overrides,
            output,
            no_strip_fence,
        } => {
            route_anima(&input, &lock, &overrides, output, !no_strip_fence)?;
        }
    }

    Ok(())
}
