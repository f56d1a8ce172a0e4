//! Working-directory vs staged-content diffing. Read-only: nothing here
//! mutates the index or the store.

use std::path::Path;

use crate::error::{Error, Result};
use crate::repo::Repository;

/// A unified diff for one staged path whose working copy differs.
#[derive(Debug, Clone)]
pub struct DiffEntry {
    /// Repository-relative path.
    pub path: String,
    /// Unified-diff text (staged content on the left, working on the
    /// right).
    pub patch: String,
}

/// A deleted or unreadable working file diffs as empty content.
fn read_working_file(path: &Path) -> Result<Vec<u8>> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => std::fs::read(path).map_err(|e| Error::io(path, e)),
        Ok(_) => Ok(Vec::new()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Compare working-directory files against their staged blobs.
///
/// Returns one entry per staged path whose working content differs from
/// the staged content; identical files produce nothing. Contents are
/// diffed as text, lossily decoded.
pub fn diff_working_vs_index(repo: &Repository) -> Result<Vec<DiffEntry>> {
    let store = repo.objects();
    let index = repo.index()?;
    let mut diffs = Vec::new();

    for (rel_path, blob_hash) in index.entries() {
        let abs_path = repo.root().join(rel_path);

        let staged = store.load_blob(*blob_hash)?;
        let working = read_working_file(&abs_path)?;

        if working == staged.data {
            continue;
        }

        let old = String::from_utf8_lossy(&staged.data).into_owned();
        let new = String::from_utf8_lossy(&working).into_owned();
        let patch = diffy::create_patch(&old, &new);

        diffs.push(DiffEntry {
            path: rel_path.clone(),
            patch: patch.to_string(),
        });
    }

    Ok(diffs)
}
