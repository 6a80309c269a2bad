//! Bundle integrity checks.

use crate::bundle::{Bundle, ResourceKind};
use serde::Serialize;
use std::path::Path;

/// Result of a bundle integrity check.
#[derive(Debug, Clone, Serialize)]
pub struct BundleReport {
    pub bundle: Bundle,
    pub ok: bool,
    pub missing: Vec<&'static str>,
}

/// Check that a bundle has its root and the three expected resource
/// subdirectories. Each check is independent; `missing` names every absent
/// one. Integrity is evaluated strictly per-bundle: the shared default root
/// is never consulted.
pub fn check(project_root: &Path, bundle: Bundle) -> BundleReport {
    let bundle_root = project_root.join(bundle.dir_name());

    let checks: [(&'static str, bool); 4] = [
        ("root", bundle_root.exists()),
        (
            ResourceKind::Rule.dir_name(),
            bundle_root.join(ResourceKind::Rule.dir_name()).exists(),
        ),
        (
            ResourceKind::Command.dir_name(),
            bundle_root.join(ResourceKind::Command.dir_name()).exists(),
        ),
        (
            ResourceKind::Subagent.dir_name(),
            bundle_root.join(ResourceKind::Subagent.dir_name()).exists(),
        ),
    ];

    let missing: Vec<&'static str> = checks
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name)
        .collect();

    BundleReport {
        bundle,
        ok: missing.is_empty(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_complete_bundle() {
        let dir = TempDir::new().unwrap();
        for sub in ["rules", "commands", "subagents"] {
            fs::create_dir_all(dir.path().join("claude").join(sub)).unwrap();
        }

        let report = check(dir.path(), Bundle::Claude);
        assert!(report.ok);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_missing_subagents_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("codex").join("rules")).unwrap();
        fs::create_dir_all(dir.path().join("codex").join("commands")).unwrap();

        let report = check(dir.path(), Bundle::Codex);
        assert!(!report.ok);
        assert_eq!(report.missing, vec!["subagents"]);
    }

    #[test]
    fn test_missing_root_reports_every_check() {
        let dir = TempDir::new().unwrap();
        let report = check(dir.path(), Bundle::Gemini);
        assert!(!report.ok);
        assert_eq!(
            report.missing,
            vec!["root", "rules", "commands", "subagents"]
        );
    }

    #[test]
    fn test_report_serialization() {
        let dir = TempDir::new().unwrap();
        let report = check(dir.path(), Bundle::Cursor);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["bundle"], "cursor");
        assert_eq!(value["ok"], false);
    }
}
