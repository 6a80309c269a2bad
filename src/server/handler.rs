//! MCP request handler implementation.

use crate::error::ProtocolResult;
use crate::protocol::{
    CallToolParams, CallToolResult, Handler, InitializeParams, InitializeResult, ListToolsResult,
    MCP_VERSION, ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::server::state::ServerState;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// MCP request handler that processes protocol messages.
pub struct McpHandler {
    state: Arc<ServerState>,
}

impl McpHandler {
    pub fn new(state: Arc<ServerState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }
}

#[async_trait]
impl Handler for McpHandler {
    async fn initialize(&self, params: InitializeParams) -> ProtocolResult<InitializeResult> {
        info!(
            "Initialize request from {} v{}",
            params.client_info.name, params.client_info.version
        );

        self.state.set_initialized(params.client_info);

        let capabilities = ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
        };

        // Bundle availability is informational only; it is re-checked on
        // every tool call, never cached from this snapshot.
        let bundles = self.state.resolver.available();
        let instructions = if bundles.is_empty() {
            "Rulesync configuration server (no agent bundles detected; serving the shared \
            default set). Available tools: list_rules, read_rule, list_commands, read_command, \
            list_subagents, read_subagent, list_bundles, validate_bundle, validate_config."
                .to_string()
        } else {
            format!(
                "Rulesync configuration server. Detected bundles: {}. \
                Available tools: list_rules, read_rule, list_commands, read_command, \
                list_subagents, read_subagent, list_bundles, validate_bundle, validate_config.",
                bundles
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        Ok(InitializeResult {
            protocol_version: MCP_VERSION.into(),
            capabilities,
            server_info: ServerInfo {
                name: self.state.config.name.to_string(),
                version: self.state.config.version.to_string(),
            },
            instructions: Some(instructions),
        })
    }

    async fn initialized(&self) -> ProtocolResult<()> {
        info!("Server initialized successfully");
        Ok(())
    }

    async fn shutdown(&self) -> ProtocolResult<()> {
        info!("Shutdown request received");
        Ok(())
    }

    async fn list_tools(&self) -> ProtocolResult<ListToolsResult> {
        let tools = self.state.tools.list();
        debug!("Listing {} tools", tools.len());

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    /// Every handler failure becomes a failure envelope here; a bad request
    /// never takes the process down.
    async fn call_tool(&self, params: CallToolParams) -> ProtocolResult<CallToolResult> {
        debug!("Tool call: {}", params.name);
        self.state.next_request_id();

        match self.state.tools.execute(params).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!("Tool execution error: {}", e);
                Ok(CallToolResult::error(e.to_string()))
            }
        }
    }
}
