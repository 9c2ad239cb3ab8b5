//! Application state shared by request handlers
// Read-only after startup; handlers never mutate it

use crate::agent::AgentResponder;
use std::sync::Arc;

/// Router state
/// Cloned into every handler; holds only shared, immutable collaborators
#[derive(Clone)]
pub struct AppState {
    /// Agent that answers validated chat requests
    pub agent: Arc<dyn AgentResponder>,
    /// Dashboard location that `GET /` redirects to, if any
    pub dashboard_url: Option<String>,
}

impl AppState {
    /// Create state around an agent with no dashboard redirect
    pub fn new(agent: Arc<dyn AgentResponder>) -> Self {
        Self {
            agent,
            dashboard_url: None,
        }
    }

    /// Set the dashboard redirect target
    pub fn with_dashboard_url(mut self, url: Option<String>) -> Self {
        self.dashboard_url = url;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("dashboard_url", &self.dashboard_url)
            .finish_non_exhaustive()
    }
}
