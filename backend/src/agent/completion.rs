//! Chat-completions client
//!
//! Direct HTTP client for OpenAI-compatible `/chat/completions` endpoints.
//! Groq and OpenAI both speak this format, so one client serves both.

use crate::agent::error::AgentError;
use crate::agent::types::{CompletionMessage, CompletionRequest, CompletionResponse};

/// Call a chat-completions endpoint and return the first choice's text
///
/// # Arguments
/// * `client` - Shared HTTP client (connection pooling)
/// * `base_url` - Provider base URL (e.g. `https://api.groq.com/openai/v1`)
/// * `api_key` - Bearer token
/// * `service` - Provider name, used in errors and logs
/// * `model` - Model identifier
/// * `messages` - Conversation turns
///
/// # Errors
/// * `AgentError::MissingApiKey` if `api_key` is empty
/// * `AgentError::Http` if the request cannot be sent
/// * `AgentError::RateLimited` / `AgentError::Status` on non-2xx replies
/// * `AgentError::InvalidResponse` if the body is not the expected JSON
/// * `AgentError::EmptyResponse` if there is no usable text
pub async fn call_chat_completion(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    service: &str,
    model: &str,
    messages: Vec<CompletionMessage>,
) -> Result<String, AgentError> {
    if api_key.is_empty() {
        return Err(AgentError::MissingApiKey(service.to_string()));
    }

    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let request_body = CompletionRequest {
        model: model.to_string(),
        messages,
    };

    tracing::debug!(
        url = %url,
        service = %service,
        model = %model,
        turns = request_body.messages.len(),
        "Calling chat completions"
    );

    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .json(&request_body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        tracing::error!(
            service = %service,
            status_code = status_code,
            error_body = %error_body,
            "Chat completions returned error status"
        );

        if status_code == 429 {
            return Err(AgentError::RateLimited {
                service: service.to_string(),
                body: error_body,
            });
        }
        return Err(AgentError::Status {
            service: service.to_string(),
            status: status_code,
            body: error_body,
        });
    }

    let response_body = response.text().await?;
    let parsed: CompletionResponse = serde_json::from_str(&response_body).map_err(|e| {
        AgentError::InvalidResponse(format!("{} - Response body: {}", e, response_body))
    })?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AgentError::EmptyResponse(format!("{} returned no choices", service)))?;

    let text = choice.message.content.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AgentError::EmptyResponse(format!(
            "{} returned an empty message",
            service
        )));
    }

    tracing::debug!(
        service = %service,
        response_len = text.len(),
        "Received chat completion"
    );

    Ok(text)
}
