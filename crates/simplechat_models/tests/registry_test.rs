use async_trait::async_trait;
use simplechat_core::{ChatConfig, ChatResponse, Message, ProviderKind};
use simplechat_error::{BuilderError, SimpleChatErrorKind, SimpleChatResult};
use simplechat_interface::{ChatProvider, ChatRequest, ImageRequest};
use simplechat_models::{ProviderRegistry, provider_for};

#[test]
fn default_registry_builds_each_provider() -> anyhow::Result<()> {
    for (kind, name, url) in [
        (ProviderKind::OpenAi, "openai", "https://api.openai.com/v1"),
        (ProviderKind::Claude, "claude", "https://api.anthropic.com/v1"),
        (
            ProviderKind::Gemini,
            "gemini",
            "https://generativelanguage.googleapis.com/v1beta",
        ),
    ] {
        let config = ChatConfig::new(kind, "key", "", "model");
        let provider = provider_for(&config)?;
        assert_eq!(provider.provider_name(), name);
        assert_eq!(provider.base_url(), url);
    }
    Ok(())
}

#[test]
fn unknown_provider_fails_before_any_client() {
    let registry = ProviderRegistry::default();
    let err = registry
        .resolve_name("mistral", "key", "", "model")
        .err()
        .expect("unknown provider must fail");
    assert!(matches!(err.kind(), SimpleChatErrorKind::Config(_)));
}

#[test]
fn empty_registry_rejects_known_provider() {
    let registry = ProviderRegistry::empty();
    let config = ChatConfig::new(ProviderKind::OpenAi, "key", "", "model");
    let err = registry.resolve(&config).err().expect("nothing registered");
    assert!(matches!(err.kind(), SimpleChatErrorKind::Config(_)));
}

#[tokio::test]
async fn openai_and_claude_refuse_image_generation() -> anyhow::Result<()> {
    let request = ImageRequest::builder().prompt("cat").model("m").build()?;
    for kind in [ProviderKind::OpenAi, ProviderKind::Claude] {
        let provider = provider_for(&ChatConfig::new(kind, "key", "", "m"))?;
        let err = provider.generate_image(&request).await.unwrap_err();
        assert!(matches!(err.kind(), SimpleChatErrorKind::NotImplemented(_)));
    }
    Ok(())
}

struct Canned;

#[async_trait]
impl ChatProvider for Canned {
    async fn chat(&self, _request: &ChatRequest) -> SimpleChatResult<ChatResponse> {
        let response = ChatResponse::builder()
            .text("canned")
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;
        Ok(response)
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn base_url(&self) -> &str {
        "memory://"
    }
}

#[tokio::test]
async fn registered_constructor_replaces_default() -> anyhow::Result<()> {
    let mut registry = ProviderRegistry::default();
    registry.register(ProviderKind::OpenAi, |_config| Box::new(Canned));

    let provider = registry.resolve(&ChatConfig::new(ProviderKind::OpenAi, "k", "", "m"))?;
    let request = ChatRequest::builder()
        .messages(vec![Message::user("hi")])
        .model("m")
        .build()?;

    assert_eq!(provider.chat(&request).await?.text(), "canned");
    assert_eq!(provider.base_url(), "memory://");
    Ok(())
}
