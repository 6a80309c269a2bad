//! Resource file location across ordered candidate roots.

use crate::bundle::ResourceKind;
use crate::error::{BundleError, BundleResult};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Find a resource file by name.
///
/// Candidates are `<root>/<dir>/<name><ext>` for each root in order, each
/// root searched in the kind's extension-priority order. First existing path
/// wins regardless of modification time. The failure diagnostics carry the
/// originally requested root (the first in the list), not the fallback.
pub fn locate(roots: &[PathBuf], kind: ResourceKind, name: &str) -> BundleResult<PathBuf> {
    for root in roots {
        for ext in kind.extensions() {
            let candidate = root.join(kind.dir_name()).join(format!("{name}{ext}"));
            if candidate.exists() {
                trace!("Located {} {} at {}", kind, name, candidate.display());
                return Ok(candidate);
            }
        }
    }

    Err(BundleError::ResourceNotFound {
        root: roots.first().cloned().unwrap_or_default(),
        kind,
        name: name.to_string(),
        extensions: kind.extensions().to_vec(),
    })
}

/// List resource names of one kind under a root, extensions stripped.
///
/// `None` when the category directory is absent: missing optional content is
/// an expected state, not a fault, and callers answer it with a structured
/// payload rather than an error.
pub fn list(root: &Path, kind: ResourceKind) -> Option<Vec<String>> {
    let dir = root.join(kind.dir_name());
    let entries = std::fs::read_dir(&dir).ok()?;

    let names = entries
        .flatten()
        .filter_map(|entry| {
            let file_name = entry.file_name();
            let file_name = file_name.to_str()?;
            kind.extensions()
                .iter()
                .find(|ext| file_name.ends_with(**ext))
                .map(|ext| file_name[..file_name.len() - ext.len()].to_string())
        })
        .collect();

    Some(names)
}
