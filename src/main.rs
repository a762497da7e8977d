//! `chatroom` server: Leptos SSR host and single-origin gateway to the chat
//! service.

#![recursion_limit = "256"]

mod config;
mod error;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "chatroom failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let port = config.port;
    tracing::info!(
        api = %config.chat_api_url,
        ws = %config.chat_ws_url,
        timeout_secs = config.timeouts.request_secs,
        "upstream chat service configured"
    );

    let state = AppState::new(config)?;
    let app = routes::app(state)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    tracing::info!(%port, "chatroom listening");
    axum::serve(listener, app).await?;
    Ok(())
}
