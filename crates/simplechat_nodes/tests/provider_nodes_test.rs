use async_trait::async_trait;
use simplechat_core::{ChatConfig, ChatResponse, ImageData, ProviderKind, Role, Vars};
use simplechat_error::{BuilderError, ProviderErrorKind, SimpleChatErrorKind, SimpleChatResult};
use simplechat_interface::{ChatProvider, ChatRequest, ImageRequest};
use simplechat_models::ProviderRegistry;
use simplechat_nodes::{
    ChatImageNode, ChatInput, ChatNode, GeminiImageEditNode, GeminiImageGenNode, NoassChatNode,
    NoassInput,
};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorder {
    chats: Arc<Mutex<Vec<ChatRequest>>>,
    images: Arc<Mutex<Vec<ImageRequest>>>,
}

impl Recorder {
    fn last_chat(&self) -> ChatRequest {
        self.chats.lock().unwrap().last().cloned().unwrap()
    }

    fn last_image(&self) -> ImageRequest {
        self.images.lock().unwrap().last().cloned().unwrap()
    }
}

struct OfflineProvider {
    kind: ProviderKind,
    reply: String,
    image: Option<ImageData>,
    recorder: Recorder,
}

#[async_trait]
impl ChatProvider for OfflineProvider {
    async fn chat(&self, request: &ChatRequest) -> SimpleChatResult<ChatResponse> {
        self.recorder.chats.lock().unwrap().push(request.clone());
        Ok(ChatResponse::builder()
            .text(self.reply.clone())
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }

    async fn generate_image(&self, request: &ImageRequest) -> SimpleChatResult<ChatResponse> {
        self.recorder.images.lock().unwrap().push(request.clone());
        Ok(ChatResponse::builder()
            .text(self.reply.clone())
            .image(self.image.clone())
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }

    fn provider(&self) -> ProviderKind {
        self.kind
    }

    fn base_url(&self) -> &str {
        "http://offline"
    }
}

fn offline(kind: ProviderKind, reply: &str, image: Option<ImageData>) -> (ProviderRegistry, Recorder) {
    let recorder = Recorder::default();
    let mut registry = ProviderRegistry::empty();
    let shared = recorder.clone();
    let reply = reply.to_string();
    registry.register(kind, move |_config| {
        Box::new(OfflineProvider {
            kind,
            reply: reply.clone(),
            image: image.clone(),
            recorder: shared.clone(),
        })
    });
    (registry, recorder)
}

fn config(kind: ProviderKind) -> ChatConfig {
    ChatConfig::new(kind, "test-key", "", "test-model")
}

#[tokio::test]
async fn chat_renders_vars_and_skips_blank_system() -> anyhow::Result<()> {
    let (registry, recorder) = offline(ProviderKind::OpenAi, "It rains.", None);
    let mut vars = Vars::new();
    vars.insert("city", "Lisbon");

    let input = ChatInput::builder()
        .prompt("Weather in {{ city }}? {{unknown}}")
        .system("   ")
        .temperature(0.2)
        .vars(vars)
        .build()?;
    let text = ChatNode::with_registry(registry)
        .run(&config(ProviderKind::OpenAi), &input)
        .await?;

    assert_eq!(text, "It rains.");
    let request = recorder.last_chat();
    assert_eq!(request.messages().len(), 1);
    assert_eq!(request.messages()[0].content.text(), "Weather in Lisbon? {{unknown}}");
    assert_eq!(request.model(), "test-model");
    assert_eq!(*request.temperature(), 0.2);
    assert_eq!(*request.max_tokens(), 2048);
    Ok(())
}

#[tokio::test]
async fn chat_image_attaches_one_image_after_system() -> anyhow::Result<()> {
    let (registry, recorder) = offline(ProviderKind::Claude, "A cat.", None);
    let input = ChatInput::builder()
        .prompt(ChatImageNode::DEFAULT_PROMPT)
        .system("Be terse.")
        .build()?;
    let image = ImageData::png(vec![1, 2, 3]);

    let text = ChatImageNode::with_registry(registry)
        .run(&config(ProviderKind::Claude), &input, &image)
        .await?;

    assert_eq!(text, "A cat.");
    let request = recorder.last_chat();
    assert_eq!(request.messages()[0].role, Role::System);
    assert_eq!(request.images(), &vec![image]);
    Ok(())
}

#[tokio::test]
async fn unregistered_provider_fails_before_any_request() {
    let (registry, recorder) = offline(ProviderKind::OpenAi, "", None);
    let input = ChatInput::builder().prompt("hi").build().unwrap();

    let err = ChatNode::with_registry(registry)
        .run(&config(ProviderKind::Gemini), &input)
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), SimpleChatErrorKind::Config(_)));
    assert!(recorder.chats.lock().unwrap().is_empty());
}

#[tokio::test]
async fn noass_turn_trims_hallucinated_user_line() -> anyhow::Result<()> {
    let (registry, recorder) = offline(
        ProviderKind::Claude,
        " she nods slowly.\n\n**User:** I walk away",
        None,
    );
    let input = NoassInput::builder()
        .scenario("A quiet tavern.")
        .user_action("hello")
        .prefill("*smiles*")
        .history("**User:** hi\n\n**Bot:** welcome")
        .char_name("Bot")
        .build()?;

    let output = NoassChatNode::with_registry(registry)
        .run(&config(ProviderKind::Claude), &input)
        .await?;

    assert_eq!(output.text(), "*smiles* she nods slowly.");
    assert_eq!(
        output.history(),
        "**User:** hi\n\n**Bot:** welcome\n\n**User:** hello\n\n**Bot:** *smiles* she nods slowly."
    );

    let request = recorder.last_chat();
    assert_eq!(request.messages().len(), 2);
    assert_eq!(request.messages()[0].content.text(), "A quiet tavern.");
    assert!(request.messages()[1].content.text().ends_with("**Bot:** *smiles*"));
    assert_eq!(request.stop()[0], "**User:**");
    assert_eq!(request.stop().len(), 3);
    Ok(())
}

#[tokio::test]
async fn noass_blank_history_starts_fresh() -> anyhow::Result<()> {
    let (registry, recorder) = offline(ProviderKind::OpenAi, "Welcome.", None);
    let input = NoassInput::builder()
        .user_action("hi")
        .history(" \n ")
        .build()?;

    let output = NoassChatNode::with_registry(registry)
        .run(&config(ProviderKind::OpenAi), &input)
        .await?;

    assert_eq!(output.text(), "Welcome.");
    assert_eq!(output.history(), "**User:** hi\n\n**Assistant:** Welcome.");
    assert_eq!(
        recorder.last_chat().messages()[0].content.text(),
        "Narrative Roleplay."
    );
    Ok(())
}

#[tokio::test]
async fn image_nodes_reject_other_providers() {
    let (registry, recorder) = offline(ProviderKind::OpenAi, "", None);

    let err = GeminiImageGenNode::with_registry(registry.clone())
        .run(&config(ProviderKind::OpenAi), "a fox", "1:1", "1K")
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), SimpleChatErrorKind::Config(_)));
    assert!(err.to_string().contains("Gemini Image Gen requires Gemini provider"));

    let err = GeminiImageEditNode::with_registry(registry)
        .run(&config(ProviderKind::OpenAi), &ImageData::png(vec![0]), "red", "1K")
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), SimpleChatErrorKind::Config(_)));
    assert!(recorder.images.lock().unwrap().is_empty());
}

#[tokio::test]
async fn image_gen_sends_ratio_and_size() -> anyhow::Result<()> {
    let generated = ImageData::png(vec![9, 9]);
    let (registry, recorder) = offline(ProviderKind::Gemini, "here", Some(generated.clone()));

    let output = GeminiImageGenNode::with_registry(registry)
        .run(&config(ProviderKind::Gemini), "a fox", "16:9", "2K")
        .await?;

    assert_eq!(output.image(), &generated);
    assert_eq!(output.text(), "here");
    let request = recorder.last_image();
    assert_eq!(request.aspect_ratio().as_deref(), Some("16:9"));
    assert_eq!(request.size().as_deref(), Some("2K"));
    assert!(request.reference_image().is_none());
    Ok(())
}

#[tokio::test]
async fn image_edit_keeps_source_aspect_ratio() -> anyhow::Result<()> {
    let source = ImageData::new("image/jpeg", vec![1]);
    let (registry, recorder) = offline(ProviderKind::Gemini, "", Some(ImageData::png(vec![2])));

    GeminiImageEditNode::with_registry(registry)
        .run(&config(ProviderKind::Gemini), &source, "make it red", "1K")
        .await?;

    let request = recorder.last_image();
    assert!(request.aspect_ratio().is_none());
    assert_eq!(request.reference_image().as_ref(), Some(&source));
    assert_eq!(request.prompt(), "make it red");
    Ok(())
}

#[tokio::test]
async fn missing_image_is_a_vendor_failure() {
    let (registry, _recorder) = offline(ProviderKind::Gemini, "refused", None);

    let err = GeminiImageGenNode::with_registry(registry)
        .run(&config(ProviderKind::Gemini), "a fox", "1:1", "1K")
        .await
        .unwrap_err();

    assert!(matches!(
        err.provider_kind(),
        Some(ProviderErrorKind::NoImageReturned(_))
    ));
}
