use simplechat_core::{
    ChatConfig, ChatResponse, ContentPart, ImageData, Message, MessageContent, ProviderKind, Role,
    VarValue, Vars,
};
use std::str::FromStr;

#[test]
fn provider_kind_parses_case_insensitively() {
    assert_eq!(ProviderKind::from_str("openai").unwrap(), ProviderKind::OpenAi);
    assert_eq!(ProviderKind::from_str("OpenAI").unwrap(), ProviderKind::OpenAi);
    assert_eq!(ProviderKind::from_str("GEMINI").unwrap(), ProviderKind::Gemini);
    assert!(ProviderKind::from_str("foo").is_err());
}

#[test]
fn only_gemini_generates_images() {
    assert!(ProviderKind::Gemini.supports_image_generation());
    assert!(!ProviderKind::OpenAi.supports_image_generation());
    assert!(!ProviderKind::Claude.supports_image_generation());
}

#[test]
fn empty_base_url_uses_provider_default() {
    let openai = ChatConfig::new(ProviderKind::OpenAi, "k", "", "gpt-4o-mini");
    let claude = ChatConfig::new(ProviderKind::Claude, "k", "  ", "claude-3-5-haiku-20241022");
    let gemini = ChatConfig::new(ProviderKind::Gemini, "k", "", "gemini-2.0-flash");

    assert_eq!(openai.base_url(), "https://api.openai.com/v1");
    assert_eq!(claude.base_url(), "https://api.anthropic.com/v1");
    assert_eq!(
        gemini.base_url(),
        "https://generativelanguage.googleapis.com/v1beta"
    );
}

#[test]
fn explicit_base_url_is_kept() {
    let config = ChatConfig::new(
        ProviderKind::OpenAi,
        "k",
        "http://localhost:8080/v1",
        "local",
    );
    assert_eq!(config.base_url(), "http://localhost:8080/v1");
}

#[test]
fn unknown_provider_name_is_config_error() {
    let err = ChatConfig::from_parts("foo", "k", "", "m").unwrap_err();
    assert!(err.to_string().contains("Unknown provider: foo"));
}

#[test]
fn debug_output_hides_api_key() {
    let config = ChatConfig::new(ProviderKind::OpenAi, "sk-secret-value", "", "gpt-4o");
    let debug = format!("{:?}", config);
    assert!(!debug.contains("sk-secret-value"));
    assert!(debug.contains("gpt-4o"));
}

#[test]
fn role_wire_names() {
    assert_eq!(Role::System.as_str(), "system");
    assert_eq!(Role::User.to_string(), "user");
    assert_eq!(
        serde_json::to_string(&Role::Assistant).unwrap(),
        "\"assistant\""
    );
}

#[test]
fn message_content_text_skips_images() {
    let content = MessageContent::Parts(vec![
        ContentPart::Text {
            text: "describe".to_string(),
        },
        ContentPart::Image {
            image: ImageData::png(vec![1, 2, 3]),
        },
    ]);
    assert_eq!(content.text(), "describe");
    assert_eq!(content.images().len(), 1);

    let message = Message::assistant("hi");
    assert_eq!(message.content, MessageContent::Text("hi".to_string()));
}

#[test]
fn image_data_base64_and_data_uri() {
    let image = ImageData::new("image/jpeg", b"abc".to_vec());
    assert_eq!(image.to_base64(), "YWJj");
    assert_eq!(image.data_uri(), "data:image/jpeg;base64,YWJj");

    let decoded = ImageData::from_base64("image/png", "YWJj").unwrap();
    assert_eq!(decoded.data(), &b"abc".to_vec());
    assert!(ImageData::from_base64("image/png", "***").is_err());
}

#[test]
fn chat_response_builder_defaults() {
    let response = ChatResponse::builder().text("ok").build().unwrap();
    assert_eq!(response.text(), "ok");
    assert!(response.image().is_none());
    assert!(response.raw().is_null());
}

#[test]
fn var_value_display() {
    assert_eq!(VarValue::Null.to_string(), "");
    assert_eq!(VarValue::Bool(true).to_string(), "True");
    assert_eq!(VarValue::Int(42).to_string(), "42");
    assert_eq!(VarValue::Float(4.5).to_string(), "4.5");
    assert_eq!(VarValue::Float(1.0).to_string(), "1.0");
    assert_eq!(VarValue::from("x").to_string(), "x");
}

#[test]
fn vars_from_json_object_keeps_scalars() {
    let value = serde_json::json!({
        "name": "Alice",
        "age": 30,
        "tags": ["a", "b"],
        "missing": null
    });
    let vars = Vars::from_json_object(value.as_object().unwrap());

    assert_eq!(vars.get("name"), Some(&VarValue::from("Alice")));
    assert_eq!(vars.get("age"), Some(&VarValue::Int(30)));
    assert_eq!(vars.get("tags"), Some(&VarValue::from("[\"a\",\"b\"]")));
    assert!(vars.get("missing").unwrap().is_null());
}

#[test]
fn vars_merge_prefers_other() {
    let mut base = Vars::new();
    base.insert("a", 1);
    base.insert("b", 2);

    let mut other = Vars::new();
    other.insert("b", 3);

    base.merge(other);
    assert_eq!(base.get("a"), Some(&VarValue::Int(1)));
    assert_eq!(base.get("b"), Some(&VarValue::Int(3)));
}
