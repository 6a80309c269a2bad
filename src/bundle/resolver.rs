//! Bundle-to-root resolution.

use crate::bundle::Bundle;
use crate::error::{BundleError, BundleResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shared configuration directory used when no bundle is named.
pub const DEFAULT_CONFIG_DIR: &str = ".rulesync";

/// Maps an optional bundle identifier to a concrete root directory.
///
/// Resolution is a pure function of the filesystem at call time; existence
/// is re-checked on every request, never cached, so external changes to the
/// bundle directories are observed immediately.
#[derive(Debug, Clone)]
pub struct BundleResolver {
    project_root: PathBuf,
}

impl BundleResolver {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Base directory for all resolution.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve a bundle to its root directory.
    ///
    /// A named bundle resolves to `<projectRoot>/<bundle>` and must exist.
    /// Without a bundle, the shared default directory is used if present,
    /// else the project root itself.
    pub fn resolve(&self, bundle: Option<Bundle>) -> BundleResult<PathBuf> {
        if let Some(bundle) = bundle {
            let root = self.project_root.join(bundle.dir_name());
            if !root.exists() {
                return Err(BundleError::NotFound(bundle));
            }
            debug!("Resolved bundle {} to {}", bundle, root.display());
            return Ok(root);
        }

        let shared = self.project_root.join(DEFAULT_CONFIG_DIR);
        if shared.exists() {
            return Ok(shared);
        }

        Ok(self.project_root.clone())
    }

    /// Ordered candidate roots for a resource lookup.
    ///
    /// With a bundle: the bundle root first, then the shared default root,
    /// so a bundle can override a subset of the shared set while inheriting
    /// the rest. Without a bundle: just the default root.
    pub fn search_roots(&self, bundle: Option<Bundle>) -> BundleResult<Vec<PathBuf>> {
        let primary = self.resolve(bundle)?;
        if bundle.is_none() {
            return Ok(vec![primary]);
        }

        let fallback = self.resolve(None)?;
        if fallback == primary {
            return Ok(vec![primary]);
        }
        Ok(vec![primary, fallback])
    }

    /// Members of the fixed bundle set whose root directory currently exists.
    pub fn available(&self) -> Vec<Bundle> {
        Bundle::ALL
            .into_iter()
            .filter(|b| self.project_root.join(b.dir_name()).exists())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        TempDir::new().unwrap()
    }

    #[test]
    fn test_resolve_named_bundle() {
        let dir = project();
        fs::create_dir(dir.path().join("claude")).unwrap();

        let resolver = BundleResolver::new(dir.path());
        let root = resolver.resolve(Some(Bundle::Claude)).unwrap();
        assert_eq!(root, dir.path().join("claude"));
    }

    #[test]
    fn test_resolve_missing_bundle() {
        let resolver = BundleResolver::new(project().path());
        let err = resolver.resolve(Some(Bundle::Codex)).unwrap_err();
        assert_eq!(err.to_string(), "Bundle not found: codex");
    }

    #[test]
    fn test_resolve_default_prefers_shared_dir() {
        let dir = project();
        fs::create_dir(dir.path().join(DEFAULT_CONFIG_DIR)).unwrap();

        let resolver = BundleResolver::new(dir.path());
        assert_eq!(
            resolver.resolve(None).unwrap(),
            dir.path().join(DEFAULT_CONFIG_DIR)
        );
    }

    #[test]
    fn test_resolve_default_falls_back_to_project_root() {
        let dir = project();
        let resolver = BundleResolver::new(dir.path());
        assert_eq!(resolver.resolve(None).unwrap(), dir.path());
    }

    #[test]
    fn test_search_roots_bundle_then_default() {
        let dir = project();
        fs::create_dir(dir.path().join("cursor")).unwrap();
        fs::create_dir(dir.path().join(DEFAULT_CONFIG_DIR)).unwrap();

        let resolver = BundleResolver::new(dir.path());
        let roots = resolver.search_roots(Some(Bundle::Cursor)).unwrap();
        assert_eq!(
            roots,
            vec![
                dir.path().join("cursor"),
                dir.path().join(DEFAULT_CONFIG_DIR)
            ]
        );

        let roots = resolver.search_roots(None).unwrap();
        assert_eq!(roots, vec![dir.path().join(DEFAULT_CONFIG_DIR)]);
    }

    #[test]
    fn test_available_filters_by_existence() {
        let dir = project();
        fs::create_dir(dir.path().join("claude")).unwrap();
        fs::create_dir(dir.path().join("gemini")).unwrap();

        let resolver = BundleResolver::new(dir.path());
        assert_eq!(resolver.available(), vec![Bundle::Claude, Bundle::Gemini]);
    }

    #[test]
    fn test_existence_rechecked_per_call() {
        let dir = project();
        let resolver = BundleResolver::new(dir.path());
        assert!(resolver.resolve(Some(Bundle::Claude)).is_err());

        fs::create_dir(dir.path().join("claude")).unwrap();
        assert!(resolver.resolve(Some(Bundle::Claude)).is_ok());
    }
}
