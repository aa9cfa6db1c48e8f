//! HTTP API server: `ideaforge serve`.

use anyhow::Result;
use ideaforge::agents::build_forge;
use ideaforge::server::{ServerConfig, start_server};
use std::path::Path;
use std::sync::Arc;

use super::super::Cli;
use super::load_config;

pub async fn cmd_serve(
    cli: &Cli,
    project_dir: &Path,
    host: Option<String>,
    port: Option<u16>,
    cors: Option<bool>,
) -> Result<()> {
    let config = load_config(cli, project_dir)?;
    let forge = Arc::new(build_forge(&config)?);

    let mut server = ServerConfig::new(&config.toml.server, &config.toml.defaults);
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    if let Some(cors) = cors {
        server.cors = cors;
    }

    tracing::info!(
        provider = %config.model.provider,
        model = %config.model.model_id,
        "starting server"
    );
    start_server(server, forge).await
}
