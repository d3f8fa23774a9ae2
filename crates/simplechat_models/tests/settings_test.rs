use simplechat_core::ProviderKind;
use simplechat_models::{ModelCatalog, SimpleChatSettings};

#[test]
fn bundled_settings_carry_defaults_and_models() -> anyhow::Result<()> {
    let settings = SimpleChatSettings::bundled()?;

    assert_eq!(settings.defaults.temperature, 1.0);
    assert_eq!(settings.defaults.max_tokens, 2048);
    assert_eq!(settings.defaults.user_name, "User");
    assert_eq!(settings.defaults.char_name, "Assistant");
    assert_eq!(settings.defaults.model_list_timeout_secs, 10);
    assert!(settings.models(ProviderKind::OpenAi).contains(&"gpt-4o".to_string()));
    assert!(
        settings
            .models(ProviderKind::Gemini)
            .contains(&"gemini-2.5-flash-image".to_string())
    );
    Ok(())
}

#[test]
fn partial_file_keeps_other_defaults() -> anyhow::Result<()> {
    let settings = SimpleChatSettings::from_toml_str(
        r#"
        [defaults]
        user_name = "Kai"

        [providers.openai]
        base_url = "http://localhost:8080/v1"
        models = ["local"]
        "#,
    )?;

    assert_eq!(settings.defaults.user_name, "Kai");
    assert_eq!(settings.defaults.max_tokens, 2048);
    assert_eq!(settings.base_url(ProviderKind::OpenAi), "http://localhost:8080/v1");
    assert_eq!(
        settings.base_url(ProviderKind::Claude),
        "https://api.anthropic.com/v1"
    );
    assert_eq!(settings.models(ProviderKind::OpenAi), ["local".to_string()]);
    assert!(settings.models(ProviderKind::Gemini).is_empty());
    Ok(())
}

#[test]
fn invalid_toml_is_config_error() {
    let err = SimpleChatSettings::from_toml_str("[defaults\nmax_tokens = ").unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
}

#[test]
fn catalog_flattens_predefined_lists() -> anyhow::Result<()> {
    let catalog = ModelCatalog::new(SimpleChatSettings::bundled()?);
    let all = catalog.all_predefined();

    assert_eq!(all.first().map(String::as_str), Some("gpt-4o"));
    assert_eq!(
        all.len(),
        catalog.predefined(ProviderKind::OpenAi).len()
            + catalog.predefined(ProviderKind::Claude).len()
            + catalog.predefined(ProviderKind::Gemini).len()
    );
    Ok(())
}

#[tokio::test]
async fn catalog_without_key_returns_predefined() -> anyhow::Result<()> {
    let catalog = ModelCatalog::new(SimpleChatSettings::bundled()?);

    let models = catalog.list("Claude", "", "").await;
    assert_eq!(models, catalog.predefined(ProviderKind::Claude));
    assert!(catalog.list("unknown", "key", "").await.is_empty());
    Ok(())
}

#[tokio::test]
async fn catalog_falls_back_when_listing_fails() -> anyhow::Result<()> {
    let catalog = ModelCatalog::new(SimpleChatSettings::bundled()?);

    // Nothing listens on port 9 of the loopback interface.
    let models = catalog.list("openai", "key", "http://127.0.0.1:9/v1").await;
    assert_eq!(models, catalog.predefined(ProviderKind::OpenAi));
    Ok(())
}
