//! Tools: list_subagents, read_subagent

use crate::bundle::{BundleResolver, ResourceKind, locator};
use crate::error::{Result, ToolError};
use crate::protocol::{CallToolResult, Tool};
use crate::tools::parse_bundle;
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct ListSubagentsArgs {
    #[serde(default)]
    pub bundle: Option<String>,
}

pub struct ListSubagentsTool {
    resolver: Arc<BundleResolver>,
}

impl ListSubagentsTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ListSubagentsTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "list_subagents".into(),
            description: Some("List all available subagent definitions".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "bundle": {
                        "type": "string",
                        "description": "Optional agent bundle (claude, codex, cursor, gemini). Defaults to .rulesync.",
                        "enum": ["claude", "codex", "cursor", "gemini"]
                    }
                }
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "list_subagents"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListSubagentsArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let bundle = parse_bundle(args.bundle.as_deref())?;
        let root = self.resolver.resolve(bundle)?;

        let Some(names) = locator::list(&root, ResourceKind::Subagent) else {
            return Ok(CallToolResult::json(&serde_json::json!({
                "error": "Subagents directory not found",
                "path": root.join(ResourceKind::Subagent.dir_name())
            })));
        };

        Ok(CallToolResult::json(&serde_json::json!({
            "subagents": names,
            "count": names.len()
        })))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadSubagentArgs {
    pub subagent_name: String,
    #[serde(default)]
    pub bundle: Option<String>,
}

pub struct ReadSubagentTool {
    resolver: Arc<BundleResolver>,
}

impl ReadSubagentTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ReadSubagentTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "read_subagent".into(),
            description: Some("Read a specific subagent definition".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "subagentName": {
                        "type": "string",
                        "description": "Name of the subagent (without .md extension)"
                    },
                    "bundle": {
                        "type": "string",
                        "description": "Optional agent bundle (claude, codex, cursor, gemini). Defaults to .rulesync.",
                        "enum": ["claude", "codex", "cursor", "gemini"]
                    }
                },
                "required": ["subagentName"]
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "read_subagent"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ReadSubagentArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let bundle = parse_bundle(args.bundle.as_deref())?;
        let roots = self.resolver.search_roots(bundle)?;
        let path = locator::locate(&roots, ResourceKind::Subagent, &args.subagent_name)?;
        let content = std::fs::read_to_string(path)?;

        Ok(CallToolResult::text(content))
    }
}
