//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Default Groq OpenAI-compatible endpoint
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Default OpenAI endpoint
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default Tavily search endpoint
pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Agent (provider and search) configuration
    pub agent: AgentConfig,
    /// Supervised dashboard configuration
    pub dashboard: DashboardConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Credentials and endpoints used by the bundled agent
#[derive(Clone)]
pub struct AgentConfig {
    /// Groq API key
    pub groq_api_key: Option<String>,
    /// OpenAI API key
    pub openai_api_key: Option<String>,
    /// Tavily API key (web search)
    pub tavily_api_key: Option<String>,
    /// Groq base URL
    pub groq_base_url: String,
    /// OpenAI base URL
    pub openai_base_url: String,
    /// Tavily base URL
    pub tavily_base_url: String,
    /// Upstream HTTP timeout in seconds
    pub timeout_secs: u64,
}

// Keys stay out of logs
impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "***"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .field("tavily_api_key", &self.tavily_api_key.as_ref().map(|_| "***"))
            .field("groq_base_url", &self.groq_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("tavily_base_url", &self.tavily_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            openai_api_key: None,
            tavily_api_key: None,
            groq_base_url: GROQ_BASE_URL.to_string(),
            openai_base_url: OPENAI_BASE_URL.to_string(),
            tavily_base_url: TAVILY_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

/// Supervised dashboard process configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Whether to spawn the dashboard on startup
    pub enabled: bool,
    /// Executable to launch
    pub command: String,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// Where `GET /` redirects, if set
    pub url: Option<String>,
    /// Chat endpoint URL handed to the child as `AGENT_API_URL`
    pub api_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: "agent-chat-dashboard".to_string(),
            args: Vec::new(),
            url: None,
            api_url: "http://127.0.0.1:8000/messages".to_string(),
        }
    }
}

/// Parse a boolean flag ("1", "true", "yes", "on")
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Chat endpoint URL a local child process can reach
///
/// Wildcard binds are reached over loopback; a specific host is used as-is.
fn local_api_url(host: &str, port: u16) -> String {
    let host = host.trim();
    match host {
        "" | "0.0.0.0" => format!("http://127.0.0.1:{}/messages", port),
        "::" | "[::]" => format!("http://[::1]:{}/messages", port),
        h if h.contains(':') && !h.starts_with('[') => format!("http://[{}]:{}/messages", h, port),
        h => format!("http://{}:{}/messages", h, port),
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server = ServerConfig {
            port: non_empty("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(8000),
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
        };

        let defaults = AgentConfig::default();
        let agent = AgentConfig {
            groq_api_key: non_empty("GROQ_API_KEY"),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            tavily_api_key: non_empty("TAVILY_API_KEY"),
            groq_base_url: non_empty("GROQ_BASE_URL").unwrap_or(defaults.groq_base_url),
            openai_base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            tavily_base_url: non_empty("TAVILY_BASE_URL").unwrap_or(defaults.tavily_base_url),
            timeout_secs: non_empty("AGENT_TIMEOUT_SECS")
                .and_then(|t| t.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
        };

        let dashboard_defaults = DashboardConfig::default();
        let dashboard = DashboardConfig {
            enabled: lookup("DASHBOARD_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            command: non_empty("DASHBOARD_COMMAND").unwrap_or(dashboard_defaults.command),
            args: lookup("DASHBOARD_ARGS")
                .map(|a| a.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            url: non_empty("DASHBOARD_URL"),
            api_url: local_api_url(&server.host, server.port),
        };

        Self {
            server,
            agent,
            dashboard,
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
