//! Tools: list_bundles, validate_bundle

use crate::bundle::{Bundle, BundleResolver, integrity};
use crate::error::{BundleError, Result, ToolError};
use crate::protocol::{CallToolResult, Tool};
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

pub struct ListBundlesTool {
    resolver: Arc<BundleResolver>,
}

impl ListBundlesTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ListBundlesTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "list_bundles".into(),
            description: Some("List available agent bundles".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    #[instrument(skip(self, _arguments), fields(tool = "list_bundles"))]
    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let bundles = self.resolver.available();

        Ok(CallToolResult::json(&serde_json::json!({
            "bundles": bundles,
            "count": bundles.len()
        })))
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidateBundleArgs {
    #[serde(default)]
    pub bundle: Option<String>,
}

pub struct ValidateBundleTool {
    resolver: Arc<BundleResolver>,
}

impl ValidateBundleTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ValidateBundleTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "validate_bundle".into(),
            description: Some("Validate that a bundle has expected folders and files".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "bundle": {
                        "type": "string",
                        "description": "Agent bundle to validate",
                        "enum": ["claude", "codex", "cursor", "gemini"]
                    }
                },
                "required": ["bundle"]
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "validate_bundle"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ValidateBundleArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let id = args
            .bundle
            .ok_or_else(|| ToolError::MissingArgument("bundle".into()))?;
        let bundle =
            Bundle::parse(&id).ok_or_else(|| BundleError::Unknown(id))?;

        let report = integrity::check(self.resolver.project_root(), bundle);
        Ok(CallToolResult::json(&report))
    }
}
