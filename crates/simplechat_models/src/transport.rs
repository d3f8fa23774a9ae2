//! Single-shot JSON transport shared by the provider clients.

use reqwest::RequestBuilder;
use simplechat_core::{ImageData, Message, Role};
use simplechat_error::{ProviderError, ProviderErrorKind};
use tracing::{debug, error};

/// Anthropic API version header value.
pub(crate) const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sends a prepared request once and returns the decoded JSON body.
///
/// Non-2xx replies become [`ProviderErrorKind::Api`] carrying the status and
/// raw body. Nothing is retried.
pub(crate) async fn send_json(
    provider: &str,
    request: RequestBuilder,
) -> Result<serde_json::Value, ProviderError> {
    let response = request.send().await.map_err(|e| {
        error!(provider, error = ?e, "Failed to send request");
        ProviderError::new(ProviderErrorKind::Transport(e.to_string()))
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(provider, status = %status, body = %body, "API returned error");
        return Err(ProviderError::new(ProviderErrorKind::Api {
            provider: provider.to_string(),
            status: status.as_u16(),
            body,
        }));
    }

    let body = response.json::<serde_json::Value>().await.map_err(|e| {
        error!(provider, error = ?e, "Failed to parse response body");
        ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
            "Failed to parse response: {}",
            e
        )))
    })?;

    debug!(provider, status = %status, "Received response");
    Ok(body)
}

/// Joins a base URL and an endpoint path with exactly one slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Index of the message that receives attached images.
///
/// Images go to the last message, and only when it has role user.
pub(crate) fn image_target(messages: &[Message], images: &[ImageData]) -> Option<usize> {
    if images.is_empty() {
        return None;
    }
    let last = messages.len().checked_sub(1)?;
    (messages[last].role == Role::User).then_some(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/", "/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(endpoint("http://x", "models"), "http://x/models");
    }

    #[test]
    fn images_only_target_trailing_user_message() {
        let images = vec![ImageData::png(vec![1])];
        let user_last = vec![Message::system("s"), Message::user("u")];
        let assistant_last = vec![Message::user("u"), Message::assistant("a")];

        assert_eq!(image_target(&user_last, &images), Some(1));
        assert_eq!(image_target(&assistant_last, &images), None);
        assert_eq!(image_target(&user_last, &[]), None);
        assert_eq!(image_target(&[], &images), None);
    }
}
