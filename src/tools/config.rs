//! Tool: validate_config

use crate::bundle::BundleResolver;
use crate::config::{CONFIG_FILE_NAME, validator};
use crate::error::{Result, ToolError};
use crate::protocol::{CallToolResult, Tool};
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateConfigArgs {
    #[serde(default)]
    pub config_path: Option<String>,
}

pub struct ValidateConfigTool {
    resolver: Arc<BundleResolver>,
}

impl ValidateConfigTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ValidateConfigTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "validate_config".into(),
            description: Some("Validate the MCP configuration file".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "configPath": {
                        "type": "string",
                        "description": "Path to mcp.json file (optional, defaults to mcp.json)"
                    }
                }
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "validate_config"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ValidateConfigArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let path = args
            .config_path
            .map(PathBuf::from)
            .unwrap_or_else(|| self.resolver.project_root().join(CONFIG_FILE_NAME));

        let report = validator::validate(&path);
        Ok(CallToolResult::json(&report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use std::fs;
    use tempfile::TempDir;

    fn payload(result: &CallToolResult) -> Value {
        let ToolContent::Text { text } = &result.content[0];
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_to_project_root_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("mcp.json"),
            r#"{"mcpServers": {"shared": {"command": "npx", "args": ["-y", "rulesync-mcp"]}}}"#,
        )
        .unwrap();

        let tool = ValidateConfigTool::new(Arc::new(BundleResolver::new(dir.path())));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let value = payload(&result);

        assert_eq!(value["valid"], true);
        assert_eq!(value["servers"], serde_json::json!(["shared"]));
        assert!(value.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_explicit_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let tool = ValidateConfigTool::new(Arc::new(BundleResolver::new(dir.path())));
        let missing = dir.path().join("custom.json");
        let result = tool
            .execute(serde_json::json!({"configPath": missing.to_str().unwrap()}))
            .await
            .unwrap();
        let value = payload(&result);

        assert_eq!(value["valid"], false);
        assert_eq!(value["error"], "Configuration file not found");
        assert!(result.is_error.is_none());
    }

    #[tokio::test]
    async fn test_single_violation_cites_server() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("mcp.json"),
            r#"{"mcpServers": {"a": {"command": "x"}}}"#,
        )
        .unwrap();

        let tool = ValidateConfigTool::new(Arc::new(BundleResolver::new(dir.path())));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let value = payload(&result);

        assert_eq!(value["valid"], false);
        assert_eq!(
            value["errors"],
            serde_json::json!(["Server a: Missing or invalid args"])
        );
    }
}
