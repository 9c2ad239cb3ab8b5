//! Agent responder
//!
//! `AgentResponder` is the seam between the chat endpoint and whatever
//! produces a response. `ProviderAgent` is the bundled implementation: an
//! optional web search followed by a single chat completion.

use crate::agent::completion::call_chat_completion;
use crate::agent::error::AgentError;
use crate::agent::search::{format_search_context, web_search};
use crate::agent::types::CompletionMessage;
use crate::catalog::Provider;
use crate::config::AgentConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Produces a response for a validated chat request
///
/// Implementations receive the request fields in this order and their result
/// is returned to the HTTP client unchanged.
#[async_trait]
pub trait AgentResponder: Send + Sync {
    /// Turn a prompt plus configuration into a response payload
    async fn get_response(
        &self,
        model_name: &str,
        messages: &[String],
        allow_search: bool,
        system_prompt: &str,
        model_provider: &str,
    ) -> Result<Value, AgentError>;
}

/// Agent backed by a hosted provider's chat-completions API
pub struct ProviderAgent {
    client: reqwest::Client,
    config: AgentConfig,
}

impl ProviderAgent {
    /// Create an agent with its own HTTP client
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create an agent around an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: AgentConfig) -> Self {
        Self { client, config }
    }

    /// Resolve base URL and API key for a provider name
    fn endpoint(&self, model_provider: &str) -> Result<(Provider, &str, &str), AgentError> {
        let provider = Provider::parse(model_provider)
            .ok_or_else(|| AgentError::UnknownProvider(model_provider.to_string()))?;

        let (base_url, key) = match provider {
            Provider::Groq => (&self.config.groq_base_url, &self.config.groq_api_key),
            Provider::OpenAI => (&self.config.openai_base_url, &self.config.openai_api_key),
        };
        let key = key
            .as_deref()
            .ok_or_else(|| AgentError::MissingApiKey(provider.to_string()))?;

        Ok((provider, base_url.as_str(), key))
    }

    /// Build the system turn, appending search context when present
    fn system_turn(system_prompt: &str, search_context: Option<String>) -> Option<CompletionMessage> {
        let mut text = system_prompt.trim().to_string();
        if let Some(context) = search_context {
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(&context);
        }
        (!text.is_empty()).then(|| CompletionMessage::system(text))
    }
}

#[async_trait]
impl AgentResponder for ProviderAgent {
    async fn get_response(
        &self,
        model_name: &str,
        messages: &[String],
        allow_search: bool,
        system_prompt: &str,
        model_provider: &str,
    ) -> Result<Value, AgentError> {
        let (provider, base_url, api_key) = self.endpoint(model_provider)?;

        let search_context = match (allow_search, messages.last()) {
            (true, Some(query)) => {
                let key = self
                    .config
                    .tavily_api_key
                    .as_deref()
                    .ok_or_else(|| AgentError::MissingApiKey("Tavily".to_string()))?;
                let hits =
                    web_search(&self.client, &self.config.tavily_base_url, key, query).await?;
                Some(format_search_context(&hits))
            }
            _ => None,
        };

        let mut turns = Vec::with_capacity(messages.len() + 1);
        turns.extend(Self::system_turn(system_prompt, search_context));
        turns.extend(messages.iter().map(CompletionMessage::user));

        tracing::info!(
            provider = %provider,
            model = %model_name,
            allow_search = allow_search,
            turns = turns.len(),
            "Requesting agent response"
        );

        let text = call_chat_completion(
            &self.client,
            base_url,
            api_key,
            provider.display_name(),
            model_name,
            turns,
        )
        .await?;

        Ok(Value::String(text))
    }
}
