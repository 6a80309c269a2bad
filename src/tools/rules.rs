//! Tools: list_rules, read_rule

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

/// Rule categories accepted by the list_rules filter enumeration.
const RULE_CATEGORIES: [&str; 8] = [
    "architecture",
    "code-quality",
    "testing",
    "security",
    "documentation",
    "performance",
    "ui-ux",
    "technology",
];

#[derive(Debug, Deserialize)]
pub struct ListRulesArgs {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub bundle: Option<String>,
}

pub struct ListRulesTool {
    resolver: Arc<BundleResolver>,
}

impl ListRulesTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ListRulesTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "list_rules".into(),
            description: Some("List all available rule files in the rulesync configuration".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Filter by category (optional)",
                        "enum": RULE_CATEGORIES
                    },
                    "bundle": {
                        "type": "string",
                        "description": "Optional agent bundle (claude, codex, cursor, gemini). Defaults to .rulesync.",
                        "enum": ["claude", "codex", "cursor", "gemini"]
                    }
                }
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "list_rules"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListRulesArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let bundle = parse_bundle(args.bundle.as_deref())?;
        let root = self.resolver.resolve(bundle)?;

        let Some(names) = locator::list(&root, ResourceKind::Rule) else {
            return Ok(CallToolResult::json(&serde_json::json!({
                "error": "Rules directory not found",
                "path": root.join(ResourceKind::Rule.dir_name()),
                "hint": "Run the setup wizard to generate the shared rule set"
            })));
        };

        // Category filter is a substring match on the stripped filename
        let filtered: Vec<String> = match &args.category {
            Some(category) => names
                .into_iter()
                .filter(|name| name.contains(category.as_str()))
                .collect(),
            None => names,
        };

        Ok(CallToolResult::json(&serde_json::json!({
            "rules": filtered,
            "count": filtered.len(),
            "category": args.category.as_deref().unwrap_or("all")
        })))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRuleArgs {
    pub rule_name: String,
    #[serde(default)]
    pub bundle: Option<String>,
}

pub struct ReadRuleTool {
    resolver: Arc<BundleResolver>,
}

impl ReadRuleTool {
    pub fn new(resolver: Arc<BundleResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ToolHandler for ReadRuleTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "read_rule".into(),
            description: Some("Read a specific rule file".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "ruleName": {
                        "type": "string",
                        "description": "Name of the rule file (without .md extension)"
                    },
                    "bundle": {
                        "type": "string",
                        "description": "Optional agent bundle (claude, codex, cursor, gemini). Defaults to .rulesync.",
                        "enum": ["claude", "codex", "cursor", "gemini"]
                    }
                },
                "required": ["ruleName"]
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "read_rule"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ReadRuleArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let bundle = parse_bundle(args.bundle.as_deref())?;
        let roots = self.resolver.search_roots(bundle)?;
        let path = locator::locate(&roots, ResourceKind::Rule, &args.rule_name)?;
        let content = std::fs::read_to_string(path)?;

        Ok(CallToolResult::text(content))
    }
}
