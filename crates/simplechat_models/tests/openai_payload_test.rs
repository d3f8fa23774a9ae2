use serde_json::{Value, json};
use simplechat_core::{ImageData, Message};
use simplechat_interface::ChatRequest;
use simplechat_models::OpenAiClient;

fn fixture(text: &str) -> Value {
    serde_json::from_str(text).expect("fixture is valid JSON")
}

#[test]
fn messages_pass_through_with_sampling_fields() -> anyhow::Result<()> {
    let request = ChatRequest::builder()
        .messages(vec![Message::system("Be brief."), Message::user("Hi")])
        .model("gpt-4o-mini")
        .temperature(0.5)
        .max_tokens(64u32)
        .build()?;

    let payload = OpenAiClient::build_payload(&request);

    assert_eq!(payload["model"], "gpt-4o-mini");
    assert_eq!(payload["temperature"], 0.5);
    assert_eq!(payload["max_tokens"], 64);
    assert_eq!(
        payload["messages"],
        json!([
            {"role": "system", "content": "Be brief."},
            {"role": "user", "content": "Hi"}
        ])
    );
    assert!(payload.get("stop").is_none());
    Ok(())
}

#[test]
fn images_rewrite_trailing_user_message() -> anyhow::Result<()> {
    let request = ChatRequest::builder()
        .messages(vec![Message::system("S"), Message::user("What is this?")])
        .model("gpt-4o")
        .images(vec![ImageData::png(b"abc".to_vec())])
        .build()?;

    let payload = OpenAiClient::build_payload(&request);
    let content = &payload["messages"][1]["content"];

    assert_eq!(content[0], json!({"type": "text", "text": "What is this?"}));
    assert_eq!(content[1]["type"], "image_url");
    assert_eq!(
        content[1]["image_url"]["url"],
        "data:image/png;base64,YWJj"
    );
    assert_eq!(payload["messages"][0]["content"], "S");
    Ok(())
}

#[test]
fn images_ignored_when_last_message_is_not_user() -> anyhow::Result<()> {
    let request = ChatRequest::builder()
        .messages(vec![Message::user("u"), Message::assistant("a")])
        .model("gpt-4o")
        .images(vec![ImageData::png(vec![1])])
        .build()?;

    let payload = OpenAiClient::build_payload(&request);
    assert_eq!(payload["messages"][0]["content"], "u");
    assert_eq!(payload["messages"][1]["content"], "a");
    Ok(())
}

#[test]
fn stop_sequences_sent_when_present() -> anyhow::Result<()> {
    let request = ChatRequest::builder()
        .messages(vec![Message::user("Hi")])
        .model("gpt-4o")
        .stop(vec!["**User:**".to_string()])
        .build()?;

    let payload = OpenAiClient::build_payload(&request);
    assert_eq!(payload["stop"], json!(["**User:**"]));
    Ok(())
}

#[test]
fn parses_first_choice() -> anyhow::Result<()> {
    let raw = fixture(include_str!("fixtures/openai_completion.json"));
    let response = OpenAiClient::parse_response(raw.clone())?;

    assert_eq!(response.text(), "Hello! How can I help?");
    assert!(response.image().is_none());
    assert_eq!(response.raw(), &raw);
    Ok(())
}

#[test]
fn missing_choices_is_malformed() {
    let err = OpenAiClient::parse_response(json!({"choices": []})).unwrap_err();
    assert_eq!(err.kind().label(), "malformed_response");
}

#[test]
fn null_content_reads_as_empty_text() -> anyhow::Result<()> {
    let raw = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
    let response = OpenAiClient::parse_response(raw)?;
    assert_eq!(response.text(), "");
    Ok(())
}
