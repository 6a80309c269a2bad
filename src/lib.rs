//! MCP server for shared agent configuration and tooling.
//!
//! Exposes a fixed catalog of operations over stdio JSON-RPC for listing and
//! reading rule, command, and subagent files, resolving per-agent bundles
//! with fallback to the shared default set, and validating the `mcp.json`
//! configuration document.
//!
//! # Example
//!
//! ```no_run
//! use rulesync_mcp::{
//!     config::ServerConfig,
//!     protocol::McpServerBuilder,
//!     server::{McpHandler, ServerStateBuilder},
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Project root from RULESYNC_ROOT, defaulting to the working directory
//!     let config = ServerConfig::from_env();
//!
//!     let state = Arc::new(
//!         ServerStateBuilder::new()
//!             .config(config)
//!             .build()
//!             .map_err(|e| anyhow::anyhow!(e))?,
//!     );
//!
//!     let handler = McpHandler::new(state);
//!     let server = McpServerBuilder::new()
//!         .handler(handler)
//!         .with_tools()
//!         .build()?;
//!
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use bundle::{Bundle, BundleReport, BundleResolver, ResourceKind};
pub use config::{ConfigReport, ServerConfig, ServerConfigBuilder};
pub use error::{BundleError, McpError, ProtocolError, Result, ToolError};
pub use protocol::{McpServer, McpServerBuilder};
pub use server::{McpHandler, ServerState, ServerStateBuilder};
pub use tools::{ToolHandler, ToolRegistry};
