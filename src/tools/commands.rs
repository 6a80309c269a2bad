//! Tools: list_commands, read_command

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
pub struct ListCommandsArgs {
    #[serde(default)]
    pub bundle: Option<String>,
}

pub struct ListCommandsTool {
    resolver: Arc<BundleResolver>,
}

impl ListCommandsTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ListCommandsTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "list_commands".into(),
            description: Some("List all available command files".into()),
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

    #[instrument(skip(self, arguments), fields(tool = "list_commands"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListCommandsArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let bundle = parse_bundle(args.bundle.as_deref())?;
        let root = self.resolver.resolve(bundle)?;

        let Some(names) = locator::list(&root, ResourceKind::Command) else {
            return Ok(CallToolResult::json(&serde_json::json!({
                "error": "Commands directory not found",
                "path": root.join(ResourceKind::Command.dir_name())
            })));
        };

        Ok(CallToolResult::json(&serde_json::json!({
            "commands": names,
            "count": names.len()
        })))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadCommandArgs {
    pub command_name: String,
    #[serde(default)]
    pub bundle: Option<String>,
}

pub struct ReadCommandTool {
    resolver: Arc<BundleResolver>,
}

impl ReadCommandTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ReadCommandTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "read_command".into(),
            description: Some("Read a specific command file".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "commandName": {
                        "type": "string",
                        "description": "Name of the command file (without .md extension)"
                    },
                    "bundle": {
                        "type": "string",
                        "description": "Optional agent bundle (claude, codex, cursor, gemini). Defaults to .rulesync.",
                        "enum": ["claude", "codex", "cursor", "gemini"]
                    }
                },
                "required": ["commandName"]
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "read_command"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ReadCommandArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let bundle = parse_bundle(args.bundle.as_deref())?;
        let roots = self.resolver.search_roots(bundle)?;
        let path = locator::locate(&roots, ResourceKind::Command, &args.command_name)?;
        let content = std::fs::read_to_string(path)?;

        Ok(CallToolResult::text(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::DEFAULT_CONFIG_DIR;
    use crate::protocol::ToolContent;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_commands_mixed_extensions() {
        let dir = TempDir::new().unwrap();
        let commands = dir.path().join(DEFAULT_CONFIG_DIR).join("commands");
        fs::create_dir_all(&commands).unwrap();
        fs::write(commands.join("deploy.md"), "deploy").unwrap();
        fs::write(commands.join("release.toml"), "[release]").unwrap();

        let tool = ListCommandsTool::new(Arc::new(BundleResolver::new(dir.path())));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let ToolContent::Text { text } = &result.content[0];
        let value: Value = serde_json::from_str(text).unwrap();

        assert_eq!(value["count"], 2);
        let mut names: Vec<String> = value["commands"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["deploy", "release"]);
    }

    #[tokio::test]
    async fn test_list_commands_missing_directory_has_no_hint() {
        let dir = TempDir::new().unwrap();
        let tool = ListCommandsTool::new(Arc::new(BundleResolver::new(dir.path())));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let ToolContent::Text { text } = &result.content[0];
        let value: Value = serde_json::from_str(text).unwrap();

        assert_eq!(value["error"], "Commands directory not found");
        assert!(value.get("hint").is_none());
    }

    #[tokio::test]
    async fn test_read_command_toml_fallback_extension() {
        let dir = TempDir::new().unwrap();
        let commands = dir.path().join(DEFAULT_CONFIG_DIR).join("commands");
        fs::create_dir_all(&commands).unwrap();
        fs::write(commands.join("release.toml"), "[release]").unwrap();

        let tool = ReadCommandTool::new(Arc::new(BundleResolver::new(dir.path())));
        let result = tool
            .execute(serde_json::json!({"commandName": "release"}))
            .await
            .unwrap();
        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "[release]");
    }

    #[tokio::test]
    async fn test_read_command_missing_name_is_invalid_arguments() {
        let dir = TempDir::new().unwrap();
        let tool = ReadCommandTool::new(Arc::new(BundleResolver::new(dir.path())));
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid arguments: "));
    }
}
