//! Error types for the rulesync MCP server.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` conversions.

use crate::bundle::{Bundle, ResourceKind};
use std::borrow::Cow;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the rulesync MCP server.
///
/// Bundle and tool failures stay transparent: their display text is exactly
/// what goes into the failure envelope returned to the client.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: Cow<'static, str> },
}

/// JSON-RPC 2.0 and MCP protocol errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Parse error: invalid JSON")]
    ParseError,

    #[error("Invalid request: {0}")]
    InvalidRequest(Cow<'static, str>),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(Cow<'static, str>),

    #[error("Internal error: {0}")]
    InternalError(Cow<'static, str>),
}

impl ProtocolError {
    /// Returns the JSON-RPC 2.0 error code.
    pub fn code(&self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) => -32601,
            Self::InvalidParams(_) => -32602,
            Self::InternalError(_) => -32603,
        }
    }
}

/// Bundle resolution and resource lookup errors.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The identifier is not a member of the fixed bundle set.
    #[error("Unknown bundle: {0}")]
    Unknown(String),

    /// The bundle is known but its root directory does not exist.
    #[error("Bundle not found: {0}")]
    NotFound(Bundle),

    /// No candidate path existed in any searched root.
    #[error("File not found: {}/{}/{} ({})", root.display(), kind.dir_name(), name, extensions.join(", "))]
    ResourceNotFound {
        /// The originally requested root, not the fallback.
        root: PathBuf,
        kind: ResourceKind,
        name: String,
        extensions: Vec<&'static str>,
    },
}

/// Tool lookup and argument errors.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(Cow<'static, str>),
}

/// Result type alias for McpError.
pub type Result<T> = std::result::Result<T, McpError>;

/// Result type alias for ProtocolError.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Result type alias for BundleError.
pub type BundleResult<T> = std::result::Result<T, BundleError>;
