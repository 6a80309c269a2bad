//! MCP tool definitions and registry.

pub mod bundles;
pub mod commands;
pub mod config;
pub mod registry;
pub mod rules;
pub mod subagents;

pub use bundles::{ListBundlesTool, ValidateBundleTool};
pub use commands::{ListCommandsTool, ReadCommandTool};
pub use config::ValidateConfigTool;
pub use registry::{ToolHandler, ToolRegistry};
pub use rules::{ListRulesTool, ReadRuleTool};
pub use subagents::{ListSubagentsTool, ReadSubagentTool};

use crate::bundle::{Bundle, BundleResolver};
use crate::error::{BundleError, Result};
use std::sync::Arc;

/// Create and register all tools.
pub fn create_registry(resolver: Arc<BundleResolver>) -> ToolRegistry {
    let registry = ToolRegistry::new();

    // Rule tools
    registry.register(ListRulesTool::new(Arc::clone(&resolver)));
    registry.register(ReadRuleTool::new(Arc::clone(&resolver)));

    // Command tools
    registry.register(ListCommandsTool::new(Arc::clone(&resolver)));
    registry.register(ReadCommandTool::new(Arc::clone(&resolver)));

    // Subagent tools
    registry.register(ListSubagentsTool::new(Arc::clone(&resolver)));
    registry.register(ReadSubagentTool::new(Arc::clone(&resolver)));

    // Bundle tools
    registry.register(ListBundlesTool::new(Arc::clone(&resolver)));
    registry.register(ValidateBundleTool::new(Arc::clone(&resolver)));

    // Configuration tools
    registry.register(ValidateConfigTool::new(resolver));

    registry
}

/// Parse an optional bundle argument against the fixed bundle set.
pub(crate) fn parse_bundle(arg: Option<&str>) -> Result<Option<Bundle>> {
    match arg {
        None => Ok(None),
        Some(id) => Bundle::parse(id)
            .map(Some)
            .ok_or_else(|| BundleError::Unknown(id.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_registry_has_full_catalog() {
        let dir = TempDir::new().unwrap();
        let registry = create_registry(Arc::new(BundleResolver::new(dir.path())));

        assert_eq!(registry.len(), 9);
        for name in [
            "list_rules",
            "read_rule",
            "list_commands",
            "read_command",
            "list_subagents",
            "read_subagent",
            "list_bundles",
            "validate_bundle",
            "validate_config",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }
    }

    #[test]
    fn test_parse_bundle() {
        assert_eq!(parse_bundle(None).unwrap(), None);
        assert_eq!(parse_bundle(Some("codex")).unwrap(), Some(Bundle::Codex));
        let err = parse_bundle(Some("emacs")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown bundle: emacs");
    }
}
