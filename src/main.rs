//! MCP server binary entry point.

use anyhow::Result;
use rulesync_mcp::{
    config::ServerConfig,
    protocol::McpServerBuilder,
    server::{McpHandler, ServerStateBuilder},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = ServerConfig::from_env();
    info!("Project root: {}", config.project_root.display());

    let state = Arc::new(
        ServerStateBuilder::new()
            .config(config)
            .build()
            .map_err(|e| anyhow::anyhow!(e))?,
    );

    info!("Server state initialized with {} tools", state.tools.len());

    let bundles = state.resolver.available();
    if bundles.is_empty() {
        info!("No agent bundles detected; serving the shared default set");
    } else {
        info!("Detected {} agent bundle(s)", bundles.len());
    }

    let handler = McpHandler::new(state);
    let server = McpServerBuilder::new()
        .handler(handler)
        .name(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .with_tools()
        .build()?;

    info!("MCP server ready, waiting for connections...");

    server.run().await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rulesync_mcp=info,warn"));

    // Structured logging goes to stderr (stdout is for MCP protocol)
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .json()
        .init();
}
