//! Structural validation of the `mcp.json` configuration document.
//!
//! The document is produced by the external setup wizard; this module only
//! reads it. Expected malformed input is reported, never raised: every call
//! returns a [`ConfigReport`], and every violation found is accumulated
//! rather than short-circuiting at the first.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validation outcome for a configuration document.
///
/// Three shapes share this struct: a file-level failure (`error` + optionally
/// `path`), a schema check (`errors` when violations exist, `servers` always),
/// and a clean pass (`servers` only). Absent fields are omitted from the
/// serialized report.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<String>>,
}

impl ConfigReport {
    fn file_not_found(path: &Path) -> Self {
        Self {
            valid: false,
            error: Some("Configuration file not found".into()),
            path: Some(path.to_path_buf()),
            errors: None,
            servers: None,
        }
    }

    fn unreadable(message: String) -> Self {
        Self {
            valid: false,
            error: Some(message),
            path: None,
            errors: None,
            servers: None,
        }
    }

    fn checked(errors: Vec<String>, servers: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            error: None,
            path: None,
            errors: (!errors.is_empty()).then_some(errors),
            servers: Some(servers),
        }
    }
}

/// Validate the configuration document at `path`.
///
/// Requires a top-level `mcpServers` object whose every entry has a string
/// `command` and an array `args`.
pub fn validate(path: &Path) -> ConfigReport {
    if !path.exists() {
        return ConfigReport::file_not_found(path);
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return ConfigReport::unreadable(e.to_string()),
    };

    let document: Value = match serde_json::from_str(&content) {
        Ok(document) => document,
        Err(e) => return ConfigReport::unreadable(e.to_string()),
    };

    let mut errors = Vec::new();
    let mut servers = Vec::new();

    match document.get("mcpServers").and_then(Value::as_object) {
        None => errors.push("Missing mcpServers property".to_string()),
        Some(entries) => {
            for (name, server) in entries {
                servers.push(name.clone());

                let command = server.get("command").and_then(Value::as_str);
                if command.is_none_or(str::is_empty) {
                    errors.push(format!("Server {name}: Missing command"));
                }

                if server.get("args").and_then(Value::as_array).is_none() {
                    errors.push(format!("Server {name}: Missing or invalid args"));
                }
            }
        }
    }

    debug!(
        "Validated {}: {} server(s), {} error(s)",
        path.display(),
        servers.len(),
        errors.len()
    );

    ConfigReport::checked(errors, servers)
}
