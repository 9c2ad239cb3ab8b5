//! Agent-specific error types
//!
//! Errors that can occur while producing an agent response (provider lookup,
//! upstream HTTP calls, response decoding, web search).

use thiserror::Error;

/// Errors that can occur while the agent produces a response
#[derive(Error, Debug)]
pub enum AgentError {
    /// Provider name is not one the agent knows how to reach
    #[error("Unknown model provider: {0}")]
    UnknownProvider(String),

    /// No API key configured for the provider
    #[error("Missing API key for {0}")]
    MissingApiKey(String),

    /// The HTTP request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("{service} returned error status {status}: {body}")]
    Status {
        /// Upstream service name
        service: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Upstream rate limit hit (HTTP 429)
    #[error("{service} rate limit exceeded (HTTP 429): {body}")]
    RateLimited {
        /// Upstream service name
        service: String,
        /// Response body
        body: String,
    },

    /// Upstream body was not the expected JSON shape
    #[error("Failed to parse JSON response: {0}")]
    InvalidResponse(String),

    /// Upstream answered without any usable content
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Web search failed
    #[error("Web search failed: {0}")]
    Search(String),
}
