//! Agent Chat Backend
//!
//! HTTP API that validates chat requests against the model allow-list and
//! forwards them to a provider-backed agent. Optionally supervises the
//! dashboard as a child process.

use agent_chat_backend::{
    agent::ProviderAgent, api, config::Config, state::AppState, supervisor::DashboardProcess,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    if config.agent.groq_api_key.is_none() && config.agent.openai_api_key.is_none() {
        warn!("Neither GROQ_API_KEY nor OPENAI_API_KEY is set; agent calls will fail");
    }

    let agent = ProviderAgent::new(config.agent.clone())
        .map_err(|e| anyhow::anyhow!("Failed to build agent HTTP client: {}", e))?;
    let app_state = AppState::new(Arc::new(agent)).with_dashboard_url(config.dashboard.url.clone());

    let app = api::router(app_state);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("🚀 Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Dashboard failures never take the API down
    let dashboard = if config.dashboard.enabled {
        match DashboardProcess::start(&config.dashboard) {
            Ok(process) => Some(process),
            Err(e) => {
                error!(error = %e, "Dashboard did not start; continuing without it");
                None
            }
        }
    } else {
        None
    };

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(process) = dashboard {
        info!(health = ?process.health_check().await, "Stopping dashboard");
        if let Err(e) = process.stop().await {
            error!(error = %e, "Failed to stop dashboard");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
