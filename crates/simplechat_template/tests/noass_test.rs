use simplechat_core::Role;
use simplechat_template::noass::{
    FALLBACK_SCENARIO, build_full_history, build_messages, extract_response, stop_sequences,
};

#[test]
fn first_turn_ends_with_character_cue() {
    let messages = build_messages("S", None, "hi", "", "User", "Bot");

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content.text(), "S");

    let story = messages[1].content.text();
    assert_eq!(messages[1].role, Role::Assistant);
    assert!(story.contains("**User:** hi"));
    assert!(story.ends_with("**Bot:**"));
}

#[test]
fn empty_system_uses_fallback() {
    let messages = build_messages("", None, "hi", "", "User", "Bot");
    assert_eq!(messages[0].content.text(), FALLBACK_SCENARIO);
}

#[test]
fn history_and_prefill_joined_by_blank_lines() {
    let messages = build_messages(
        "World",
        Some("**User:** a\n\n**Bot:** b"),
        "c",
        "She smiles",
        "User",
        "Bot",
    );
    assert_eq!(
        messages[1].content.text(),
        "**User:** a\n\n**Bot:** b\n\n**User:** c\n\n**Bot:** She smiles"
    );
}

#[test]
fn empty_history_is_omitted() {
    let with_none = build_messages("S", None, "x", "", "U", "C");
    let with_empty = build_messages("S", Some(""), "x", "", "U", "C");
    assert_eq!(with_none, with_empty);
    assert!(!with_empty[1].content.text().starts_with('\n'));
}

#[test]
fn extract_truncates_hallucinated_user_turn() {
    let raw = "  The door opens.\n\n**User:** I walk in\n\n**Bot:** more  ";
    assert_eq!(extract_response(raw, "User"), "The door opens.");
    assert_eq!(extract_response("  clean reply ", "User"), "clean reply");
}

#[test]
fn full_history_round_trip() {
    let history = build_full_history(None, "hi", "", "Hello there.", "User", "Bot");
    assert_eq!(history, "**User:** hi\n\n**Bot:** Hello there.");

    let next = build_full_history(Some(history.as_str()), "bye", "Waving,", "she leaves.", "User", "Bot");
    assert_eq!(
        next,
        "**User:** hi\n\n**Bot:** Hello there.\n\n**User:** bye\n\n**Bot:** Waving, she leaves."
    );

    let continued = format!("{} Then silence.\n\n**User:** wait", next);
    let tail = continued.rsplit("**Bot:**").next().unwrap_or_default();
    assert_eq!(
        extract_response(tail, "User"),
        "Waving, she leaves. Then silence."
    );
}

#[test]
fn full_history_is_deterministic() {
    let a = build_full_history(Some("h"), "u", "p", "r", "User", "Bot");
    let b = build_full_history(Some("h"), "u", "p", "r", "User", "Bot");
    assert_eq!(a, b);
}

#[test]
fn stop_sequences_cover_line_starts() {
    assert_eq!(
        stop_sequences("Kai"),
        vec!["**Kai:**", "\n**Kai:**", "\n\n**Kai:**"]
    );
}
