//! Model catalog
//!
//! Single source of truth for the model allow-list and the provider/model
//! pairs offered to clients. Both the API service and the dashboard read
//! from here.

use serde::{Deserialize, Serialize};

/// Model identifiers accepted by `POST /messages`
pub const ALLOWED_MODEL_NAMES: [&str; 4] = [
    "llama3-70b-8192",
    "mixtral-8x7b-32768",
    "llama-3.3-70b-versatile",
    "gpt-4o-mini",
];

/// Models offered for the Groq provider (first entry is the default)
pub const GROQ_MODELS: [&str; 2] = ["llama-3.3-70b-versatile", "mixtral-8x7b-32768"];

/// Models offered for the OpenAI provider (first entry is the default)
pub const OPENAI_MODELS: [&str; 1] = ["gpt-4o-mini"];

/// Check whether a model name is on the allow-list
pub fn is_allowed_model(model_name: &str) -> bool {
    ALLOWED_MODEL_NAMES.contains(&model_name)
}

/// Language-model provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Provider {
    /// Groq hosted models
    #[default]
    Groq,
    /// OpenAI hosted models
    OpenAI,
}

impl Provider {
    /// Name used on the wire and in the UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Groq => "Groq",
            Provider::OpenAI => "OpenAI",
        }
    }

    /// All providers, in the order they are offered
    pub fn available() -> [Provider; 2] {
        [Provider::Groq, Provider::OpenAI]
    }

    /// Models offered for this provider
    pub fn models(&self) -> &'static [&'static str] {
        match self {
            Provider::Groq => &GROQ_MODELS,
            Provider::OpenAI => &OPENAI_MODELS,
        }
    }

    /// Default model for this provider
    pub fn default_model(&self) -> &'static str {
        self.models()[0]
    }

    /// Parse a provider name case-insensitively
    pub fn parse(name: &str) -> Option<Provider> {
        Provider::available()
            .into_iter()
            .find(|p| p.display_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
