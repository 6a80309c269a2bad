//! Agent bundle resolution and resource lookup.
//!
//! A bundle is a named configuration target (an agent or IDE integration)
//! with its own directory of rule, command, and subagent files under the
//! project root. When no bundle is named, the shared `.rulesync` directory
//! is used, falling back to the project root itself.

pub mod integrity;
pub mod locator;
pub mod resolver;

pub use integrity::BundleReport;
pub use resolver::{BundleResolver, DEFAULT_CONFIG_DIR};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bundle identifier from the fixed, closed set of agent targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bundle {
    Claude,
    Codex,
    Cursor,
    Gemini,
}

impl Bundle {
    /// Every member of the fixed bundle set, in catalog order.
    pub const ALL: [Bundle; 4] = [Self::Claude, Self::Codex, Self::Cursor, Self::Gemini];

    /// Parse a bundle identifier. Anything outside the fixed set is `None`;
    /// callers surface that as an "Unknown bundle" failure.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "claude" => Some(Self::Claude),
            "codex" => Some(Self::Codex),
            "cursor" => Some(Self::Cursor),
            "gemini" => Some(Self::Gemini),
            _ => None,
        }
    }

    /// Directory name of this bundle under the project root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
            Self::Cursor => "cursor",
            Self::Gemini => "gemini",
        }
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The kind of a configuration resource file.
///
/// Each kind lives in its own subdirectory and has its own ordered list of
/// candidate extensions; order is lookup priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Rule,
    Command,
    Subagent,
}

impl ResourceKind {
    /// Subdirectory holding this kind of resource.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Rule => "rules",
            Self::Command => "commands",
            Self::Subagent => "subagents",
        }
    }

    /// Candidate file extensions, highest priority first.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Rule => &[".md", ".mdc"],
            Self::Command => &[".md", ".toml"],
            Self::Subagent => &[".md"],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule => f.write_str("rule"),
            Self::Command => f.write_str("command"),
            Self::Subagent => f.write_str("subagent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_parse() {
        assert_eq!(Bundle::parse("claude"), Some(Bundle::Claude));
        assert_eq!(Bundle::parse("codex"), Some(Bundle::Codex));
        assert_eq!(Bundle::parse("cursor"), Some(Bundle::Cursor));
        assert_eq!(Bundle::parse("gemini"), Some(Bundle::Gemini));
        assert_eq!(Bundle::parse("vscode"), None);
        assert_eq!(Bundle::parse("Claude"), None);
    }

    #[test]
    fn test_bundle_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Bundle::Gemini).unwrap(), "\"gemini\"");
        let parsed: Bundle = serde_json::from_str("\"cursor\"").unwrap();
        assert_eq!(parsed, Bundle::Cursor);
    }

    #[test]
    fn test_resource_kind_extension_priority() {
        assert_eq!(ResourceKind::Rule.extensions(), &[".md", ".mdc"]);
        assert_eq!(ResourceKind::Command.extensions(), &[".md", ".toml"]);
        assert_eq!(ResourceKind::Subagent.extensions(), &[".md"]);
    }
}
