//! Server configuration.

pub mod validator;

pub use validator::{ConfigReport, validate};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;

/// Environment variable naming the project root for all resolution.
pub const PROJECT_ROOT_ENV: &str = "RULESYNC_ROOT";

/// Default name of the configuration document under the project root.
pub const CONFIG_FILE_NAME: &str = "mcp.json";

/// Server configuration.
///
/// The project root is carried here explicitly so tests can point the whole
/// server at a synthetic filesystem root without touching the process
/// environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: Cow<'static, str>,
    pub version: Cow<'static, str>,
    pub project_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "rulesync-mcp".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            project_root: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Build from the environment: `RULESYNC_ROOT` designates the project
    /// root; its absence defaults to the current working directory.
    pub fn from_env() -> Self {
        let project_root = env::var_os(PROJECT_ROOT_ENV)
            .map(PathBuf::from)
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            project_root,
            ..Self::default()
        }
    }

    /// Default path of the configuration document.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(CONFIG_FILE_NAME)
    }
}

/// Builder for ServerConfig.
#[derive(Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        self.config.version = version.into();
        self
    }

    pub fn project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.config.project_root = project_root.into();
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ServerConfig::builder()
            .name("test-server")
            .project_root("/tmp/project")
            .build();

        assert_eq!(config.name, "test-server");
        assert_eq!(config.project_root, PathBuf::from("/tmp/project"));
        assert_eq!(config.config_path(), PathBuf::from("/tmp/project/mcp.json"));
    }

    #[test]
    fn test_default_version_matches_crate() {
        let config = ServerConfig::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
    }
}
