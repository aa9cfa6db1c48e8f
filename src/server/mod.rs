//! HTTP transport: JSON endpoints plus the depth-mode SSE stream.

pub mod api;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::forge_config::{DefaultsConfig, ServerSection};
use crate::orchestrator::Forge;
use api::AppState;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: bool,
    pub defaults: DefaultsConfig,
}

impl ServerConfig {
    pub fn new(server: &ServerSection, defaults: &DefaultsConfig) -> Self {
        Self {
            host: server.host.clone(),
            port: server.port,
            cors: server.cors,
            defaults: defaults.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(&ServerSection::default(), &DefaultsConfig::default())
    }
}

/// Build the full application router.
pub fn build_router(state: api::SharedState, cors: bool) -> Router {
    let app = api::api_router().with_state(state);
    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Serve the API until Ctrl-C.
pub async fn start_server(config: ServerConfig, forge: Arc<Forge>) -> Result<()> {
    let state = Arc::new(AppState {
        forge: Arc::clone(&forge),
        defaults: config.defaults.clone(),
    });
    let app = build_router(state, config.cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, cors = config.cors, "server listening");
    println!("Idea Forge API running at http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(forge))
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal(forge: Arc<Forge>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    // Let an open depth stream finish at its next iteration boundary.
    forge.interrupt();
    println!("\nShutting down...");
}
