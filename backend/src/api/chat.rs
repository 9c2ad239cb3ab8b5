//! Chat API endpoint
//!
//! `POST /messages`: validates the model allow-list and hands the request to
//! the agent. Whatever the agent returns goes back to the client untouched.

use crate::agent::AgentResponder;
use crate::catalog::is_allowed_model;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Error text returned for a model outside the allow-list
pub const INVALID_MODEL_MESSAGE: &str = "Invalid model name. Kindly select a valid AI model";

/// Chat request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier; must be on the allow-list
    pub model_name: String,
    /// Provider name (e.g. "Groq", "OpenAI")
    pub model_provider: String,
    /// System prompt defining the agent
    pub system_prompt: String,
    /// User messages, oldest first
    pub messages: Vec<String>,
    /// Whether the agent may search the web
    pub allow_search: bool,
}

/// Validate a request and forward it to the agent
///
/// # Returns
/// * `Ok(Value)` - The agent's payload, or `{"error": ...}` for a rejected model
/// * `Err(AppError)` - If the agent failed
pub async fn handle_chat(
    agent: &dyn AgentResponder,
    request: ChatRequest,
) -> Result<Value, AppError> {
    if !is_allowed_model(&request.model_name) {
        warn!(model = %request.model_name, "Rejected model outside allow-list");
        return Ok(json!({ "error": INVALID_MODEL_MESSAGE }));
    }

    info!(
        model = %request.model_name,
        provider = %request.model_provider,
        messages = request.messages.len(),
        allow_search = request.allow_search,
        "Forwarding chat request to agent"
    );

    let response = agent
        .get_response(
            &request.model_name,
            &request.messages,
            request.allow_search,
            &request.system_prompt,
            &request.model_provider,
        )
        .await?;

    Ok(response)
}

/// POST /messages - Chat with the agent
pub async fn chat_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let response = handle_chat(state.agent.as_ref(), request).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Recorded agent call: (model_name, messages, allow_search, system_prompt, model_provider)
    type Call = (String, Vec<String>, bool, String, String);

    #[derive(Default)]
    struct RecordingAgent {
        calls: Mutex<Vec<Call>>,
        fail: bool,
    }

    #[async_trait]
    impl AgentResponder for RecordingAgent {
        async fn get_response(
            &self,
            model_name: &str,
            messages: &[String],
            allow_search: bool,
            system_prompt: &str,
            model_provider: &str,
        ) -> Result<Value, AgentError> {
            self.calls.lock().unwrap().push((
                model_name.to_string(),
                messages.to_vec(),
                allow_search,
                system_prompt.to_string(),
                model_provider.to_string(),
            ));
            if self.fail {
                return Err(AgentError::EmptyResponse("scripted failure".to_string()));
            }
            Ok(json!({"answer": 42, "nested": ["a", "b"]}))
        }
    }

    fn request(model: &str) -> ChatRequest {
        ChatRequest {
            model_name: model.to_string(),
            model_provider: "Groq".to_string(),
            system_prompt: String::new(),
            messages: vec!["hi".to_string()],
            allow_search: false,
        }
    }

    #[tokio::test]
    async fn test_invalid_model_skips_agent() {
        let agent = RecordingAgent::default();
        let response = handle_chat(&agent, request("bogus-model")).await.unwrap();

        assert_eq!(
            response,
            json!({"error": "Invalid model name. Kindly select a valid AI model"})
        );
        assert!(agent.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_every_allowed_model_is_forwarded() {
        for model in crate::catalog::ALLOWED_MODEL_NAMES {
            let agent = RecordingAgent::default();
            let response = handle_chat(&agent, request(model)).await.unwrap();
            assert_eq!(response, json!({"answer": 42, "nested": ["a", "b"]}));
            assert_eq!(agent.calls.lock().unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_fields_forwarded_in_order() {
        let agent = RecordingAgent::default();
        let request = ChatRequest {
            model_name: "gpt-4o-mini".to_string(),
            model_provider: "OpenAI".to_string(),
            system_prompt: "Be helpful".to_string(),
            messages: vec!["first".to_string(), "second".to_string()],
            allow_search: true,
        };
        handle_chat(&agent, request).await.unwrap();

        let calls = agent.calls.lock().unwrap();
        assert_eq!(
            calls[0],
            (
                "gpt-4o-mini".to_string(),
                vec!["first".to_string(), "second".to_string()],
                true,
                "Be helpful".to_string(),
                "OpenAI".to_string(),
            )
        );
    }

    #[tokio::test]
    async fn test_agent_failure_propagates() {
        let agent = RecordingAgent {
            fail: true,
            ..Default::default()
        };
        let result = handle_chat(&agent, request("llama3-70b-8192")).await;
        assert!(matches!(result, Err(AppError::Agent(_))));
    }

    #[test]
    fn test_chat_request_wire_format() {
        let parsed: ChatRequest = serde_json::from_str(
            r#"{"model_name": "llama3-70b-8192", "model_provider": "Groq",
                "system_prompt": "", "messages": ["hi"], "allow_search": false}"#,
        )
        .unwrap();
        assert_eq!(parsed, request("llama3-70b-8192"));
    }
}
