//! Real API calls; run with `--features api` and keys in `.env`.

use simplechat_core::{ChatConfig, Message, ProviderKind};
use simplechat_interface::ChatRequest;
use simplechat_models::provider_for;
use std::env;

async fn say_test(kind: ProviderKind, key_var: &str, model: &str) -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let api_key = env::var(key_var)?;

    let config = ChatConfig::new(kind, api_key, "", model);
    let provider = provider_for(&config)?;
    let request = ChatRequest::builder()
        .messages(vec![
            Message::system("Answer with one word."),
            Message::user("Say 'test' and nothing else."),
        ])
        .model(model)
        .max_tokens(16u32)
        .build()?;

    let response = provider.chat(&request).await?;
    assert!(!response.text().is_empty());
    println!("Response: {}", response.text());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn openai_simple_generation() -> anyhow::Result<()> {
    say_test(ProviderKind::OpenAi, "OPENAI_API_KEY", "gpt-4o-mini").await
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn claude_simple_generation() -> anyhow::Result<()> {
    say_test(ProviderKind::Claude, "ANTHROPIC_API_KEY", "claude-3-5-haiku-20241022").await
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn gemini_simple_generation() -> anyhow::Result<()> {
    say_test(ProviderKind::Gemini, "GEMINI_API_KEY", "gemini-2.0-flash").await
}
