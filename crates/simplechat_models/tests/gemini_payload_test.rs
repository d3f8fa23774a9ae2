use serde_json::{Value, json};
use simplechat_core::{ImageData, Message};
use simplechat_interface::{ChatRequest, ImageRequest};
use simplechat_models::GeminiClient;

#[test]
fn roles_remapped_and_system_instruction_extracted() -> anyhow::Result<()> {
    let request = ChatRequest::builder()
        .messages(vec![
            Message::system("Stay in character."),
            Message::user("Hello"),
            Message::assistant("Greetings"),
            Message::user("Look at this"),
        ])
        .model("gemini-2.0-flash")
        .temperature(0.7)
        .max_tokens(512u32)
        .images(vec![ImageData::png(b"abc".to_vec())])
        .build()?;

    let payload = GeminiClient::build_payload(&request);

    assert_eq!(
        payload["systemInstruction"],
        json!({"parts": [{"text": "Stay in character."}]})
    );
    let contents = payload["contents"].as_array().expect("contents array");
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0], json!({"role": "user", "parts": [{"text": "Hello"}]}));
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(
        contents[2]["parts"],
        json!([
            {"inline_data": {"mime_type": "image/png", "data": "YWJj"}},
            {"text": "Look at this"}
        ])
    );
    assert_eq!(payload["generationConfig"]["temperature"], 0.7);
    assert_eq!(payload["generationConfig"]["maxOutputTokens"], 512);
    assert!(payload["generationConfig"].get("responseModalities").is_none());
    Ok(())
}

#[test]
fn image_output_and_stop_sequences_in_generation_config() -> anyhow::Result<()> {
    let request = ChatRequest::builder()
        .messages(vec![Message::user("Draw")])
        .model("gemini-2.5-flash-image")
        .enable_image_output(true)
        .stop(vec!["END".to_string()])
        .build()?;

    let config = &GeminiClient::build_payload(&request)["generationConfig"];
    assert_eq!(config["responseModalities"], json!(["TEXT", "IMAGE"]));
    assert_eq!(config["stopSequences"], json!(["END"]));
    Ok(())
}

#[test]
fn image_payload_with_reference_and_config() -> anyhow::Result<()> {
    let request = ImageRequest::builder()
        .prompt("make it blue")
        .model("gemini-2.5-flash-image")
        .reference_image(Some(ImageData::png(b"abc".to_vec())))
        .aspect_ratio(Some("16:9".to_string()))
        .size(Some("2K".to_string()))
        .build()?;

    let payload = GeminiClient::build_image_payload(&request);

    assert_eq!(
        payload["contents"],
        json!([{"parts": [
            {"inline_data": {"mime_type": "image/png", "data": "YWJj"}},
            {"text": "make it blue"}
        ]}])
    );
    assert_eq!(
        payload["generationConfig"],
        json!({
            "responseModalities": ["TEXT", "IMAGE"],
            "imageConfig": {"aspectRatio": "16:9", "imageSize": "2K"}
        })
    );
    Ok(())
}

#[test]
fn edit_payload_omits_aspect_ratio() -> anyhow::Result<()> {
    let request = ImageRequest::builder()
        .prompt("remove the hat")
        .model("gemini-2.5-flash-image")
        .aspect_ratio(None::<String>)
        .build()?;

    let payload = GeminiClient::build_image_payload(&request);
    assert_eq!(
        payload["generationConfig"]["imageConfig"],
        json!({"imageSize": "1K"})
    );
    Ok(())
}

#[test]
fn text_parts_concatenate() -> anyhow::Result<()> {
    let raw: Value = serde_json::from_str(include_str!("fixtures/gemini_text.json"))?;
    let response = GeminiClient::parse_response(raw)?;
    assert_eq!(response.text(), "Once upon a time.");
    assert!(response.image().is_none());
    Ok(())
}

#[test]
fn inline_image_decoded() -> anyhow::Result<()> {
    let raw: Value = serde_json::from_str(include_str!("fixtures/gemini_image.json"))?;
    let response = GeminiClient::parse_image_response(raw)?;

    assert_eq!(response.text(), "Here is your cat.");
    let image = response.image().as_ref().expect("image part");
    assert_eq!(image.mime(), "image/png");
    assert_eq!(
        image.data(),
        &vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    );
    Ok(())
}

#[test]
fn missing_image_is_distinct_failure() -> anyhow::Result<()> {
    let raw: Value = serde_json::from_str(include_str!("fixtures/gemini_text.json"))?;
    let err = GeminiClient::parse_image_response(raw).unwrap_err();
    assert_eq!(err.kind().label(), "no_image");
    assert!(err.kind().status().is_none());
    Ok(())
}

#[test]
fn no_candidates_is_empty_text() -> anyhow::Result<()> {
    let response = GeminiClient::parse_response(json!({}))?;
    assert_eq!(response.text(), "");
    Ok(())
}
