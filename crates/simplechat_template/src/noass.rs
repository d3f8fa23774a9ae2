//! NoASS ("no assistant turns") transcript formatting.
//!
//! Some roleplay-tuned models continue a single narrative block better than
//! they answer alternating chat turns. The whole story (history, the new
//! user line and the character cue) is sent as one assistant message which
//! the model completes.
//!
//! Transcripts are blocks of `**Name:** text` separated by blank lines.

use simplechat_core::Message;
use tracing::debug;

/// Scenario text used when the caller supplies none.
pub const FALLBACK_SCENARIO: &str = "Narrative Roleplay.";

const BLOCK_SEPARATOR: &str = "\n\n";

/// Speaker prefix, e.g. `**User:**`.
pub fn speaker_prefix(name: &str) -> String {
    format!("**{}:**", name)
}

fn non_empty(history: Option<&str>) -> Option<&str> {
    history.filter(|h| !h.is_empty())
}

/// Builds the two-message NoASS request.
///
/// The first message (role user) carries the scenario, or
/// [`FALLBACK_SCENARIO`] when `system` is empty. The second (role
/// assistant) holds the history, the new user line and the character cue,
/// joined by blank lines. An empty `prefill_start` leaves the bare cue.
///
/// # Examples
///
/// ```
/// use simplechat_core::Role;
/// use simplechat_template::noass::build_messages;
///
/// let messages = build_messages("S", None, "hi", "", "User", "Bot");
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].role, Role::Assistant);
/// assert_eq!(messages[1].content.text(), "**User:** hi\n\n**Bot:**");
/// ```
pub fn build_messages(
    system: &str,
    history: Option<&str>,
    user_input: &str,
    prefill_start: &str,
    user_name: &str,
    char_name: &str,
) -> Vec<Message> {
    let scenario = if system.is_empty() {
        FALLBACK_SCENARIO
    } else {
        system
    };

    let mut blocks: Vec<String> = Vec::with_capacity(3);
    if let Some(history) = non_empty(history) {
        blocks.push(history.to_string());
    }
    blocks.push(format!("{} {}", speaker_prefix(user_name), user_input));
    if prefill_start.is_empty() {
        blocks.push(speaker_prefix(char_name));
    } else {
        blocks.push(format!("{} {}", speaker_prefix(char_name), prefill_start));
    }

    vec![
        Message::user(scenario),
        Message::assistant(blocks.join(BLOCK_SEPARATOR)),
    ]
}

/// Cuts `text` at the first `**{user_name}:**` and trims the rest.
///
/// A model that starts writing the user's next line has gone past its turn.
pub fn extract_response(text: &str, user_name: &str) -> String {
    let prefix = speaker_prefix(user_name);
    let kept = match text.find(&prefix) {
        Some(at) => {
            debug!(at, "Dropping hallucinated user turn");
            &text[..at]
        }
        None => text,
    };
    kept.trim().to_string()
}

/// Appends the new user line and the full character line to `history`.
///
/// The character line is `prefill_start` and `response` joined by a space
/// when both are present. Pure: identical inputs give identical output.
pub fn build_full_history(
    history: Option<&str>,
    user_input: &str,
    prefill_start: &str,
    response: &str,
    user_name: &str,
    char_name: &str,
) -> String {
    let char_prefix = speaker_prefix(char_name);
    let character_line = match (prefill_start.is_empty(), response.is_empty()) {
        (false, false) => format!("{} {} {}", char_prefix, prefill_start, response),
        (false, true) => format!("{} {}", char_prefix, prefill_start),
        (true, _) => format!("{} {}", char_prefix, response),
    };
    let user_line = format!("{} {}", speaker_prefix(user_name), user_input);

    match non_empty(history) {
        Some(history) => [history, user_line.as_str(), character_line.as_str()]
            .join(BLOCK_SEPARATOR),
        None => [user_line.as_str(), character_line.as_str()].join(BLOCK_SEPARATOR),
    }
}

/// Stop strings that halt generation before the user's next line.
pub fn stop_sequences(user_name: &str) -> Vec<String> {
    let prefix = speaker_prefix(user_name);
    vec![
        prefix.clone(),
        format!("\n{}", prefix),
        format!("\n\n{}", prefix),
    ]
}
