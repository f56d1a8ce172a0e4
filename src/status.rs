//! Repository status: staged, modified, and untracked paths. A read-only
//! consumer of the store, the index, and recursive tree walks.

use std::collections::BTreeMap;
use std::path::Path;

use crate::diff::diff_working_vs_index;
use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use crate::object::EntryKind;
use crate::repo::{Repository, META_DIR};
use crate::store::ObjectStore;

/// Snapshot of the repository's pending state.
#[derive(Debug, Clone, Default)]
pub struct Status {
    /// Staged paths that differ from the HEAD commit (or are new).
    pub staged: Vec<String>,
    /// Staged paths whose working copy has changed since staging.
    pub modified: Vec<String>,
    /// Working files not present in the index.
    pub untracked: Vec<String>,
}

impl Status {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.modified.is_empty() && self.untracked.is_empty()
    }
}

/// Flatten the snapshot reachable from a tree into path → blob hash.
///
/// Entry kinds are read from the tree itself, so the walk never has to
/// guess whether a child is a subtree or file content.
fn flatten_tree(
    store: &ObjectStore,
    tree_hash: ObjectHash,
    prefix: &str,
    out: &mut BTreeMap<String, ObjectHash>,
) -> Result<()> {
    let tree = store.load_tree(tree_hash)?;
    for (name, entry) in tree.entries() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        };
        match entry.kind {
            EntryKind::Tree => flatten_tree(store, entry.hash, &path, out)?,
            EntryKind::Blob => {
                out.insert(path, entry.hash);
            }
        }
    }
    Ok(())
}

/// The HEAD commit's snapshot as a flat path → blob-hash map; empty when
/// the branch has no commits yet.
pub fn head_snapshot(repo: &Repository) -> Result<BTreeMap<String, ObjectHash>> {
    let mut out = BTreeMap::new();
    let Some(commit_hash) = repo.head_commit()? else {
        return Ok(out);
    };

    let store = repo.objects();
    let commit = store.load_commit(commit_hash)?;
    flatten_tree(&store, commit.tree, "", &mut out)?;
    Ok(out)
}

fn walk_working_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io(dir, e)),
    };

    for entry in read_dir {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if dir == root && entry.file_name() == META_DIR {
            continue;
        }

        let meta = std::fs::symlink_metadata(&path).map_err(|e| Error::io(&path, e))?;
        if meta.is_dir() {
            walk_working_files(root, &path, out)?;
        } else if meta.is_file() {
            let rel = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            out.push(rel);
        }
    }
    Ok(())
}

/// Compute the current status report.
pub fn status(repo: &Repository) -> Result<Status> {
    let index = repo.index()?;
    let mut report = Status::default();

    // Staged: index vs HEAD snapshot.
    let head_files = head_snapshot(repo)?;
    for (path, blob_hash) in index.entries() {
        match head_files.get(path) {
            Some(head_hash) if head_hash == blob_hash => {}
            _ => report.staged.push(path.clone()),
        }
    }

    // Modified but not staged: working vs index.
    for diff in diff_working_vs_index(repo)? {
        report.modified.push(diff.path);
    }

    // Untracked: working files absent from the index.
    let mut working = Vec::new();
    walk_working_files(repo.root(), repo.root(), &mut working)?;
    working.sort();
    for path in working {
        if !index.entries().contains_key(&path) {
            report.untracked.push(path);
        }
    }

    Ok(report)
}
