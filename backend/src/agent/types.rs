//! Upstream wire types
//!
//! Structs that mirror the OpenAI-compatible chat-completions format (used by
//! both Groq and OpenAI) and the Tavily search format.

use serde::{Deserialize, Serialize};

/// Chat-completions request body
#[derive(Serialize, Debug)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation turns
    pub messages: Vec<CompletionMessage>,
}

/// A single conversation turn
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    /// Turn text
    pub content: String,
}

impl CompletionMessage {
    /// System turn
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// User turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completions response body
#[derive(Deserialize, Debug)]
pub struct CompletionResponse {
    /// Candidate completions
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One candidate completion
#[derive(Deserialize, Debug)]
pub struct Choice {
    /// Assistant message
    pub message: ChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    #[allow(dead_code)] // Part of API response format
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice
#[derive(Deserialize, Debug)]
pub struct ChoiceMessage {
    /// Message text (absent for pure tool-call turns)
    #[serde(default)]
    pub content: Option<String>,
}

/// Tavily search request body
#[derive(Serialize, Debug)]
pub struct SearchRequest {
    /// API key
    pub api_key: String,
    /// Search query
    pub query: String,
    /// Maximum number of results
    pub max_results: u32,
}

/// Tavily search response body
#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    /// Search hits
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single search hit
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Page title
    #[serde(default)]
    pub title: String,
    /// Page URL
    #[serde(default)]
    pub url: String,
    /// Extracted snippet
    #[serde(default)]
    pub content: String,
}
