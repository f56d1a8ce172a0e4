//! Snapshot restoration: materialize a stored tree back onto the
//! filesystem, and the destructive branch checkout built on top of it.

use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use crate::object::EntryKind;
use crate::repo::{Repository, META_DIR};
use crate::store::ObjectStore;

/// Recursively recreate the file/directory structure of a stored tree
/// under `target`.
///
/// Tree-kind entries become directories (created if absent); blob-kind
/// entries become files, overwriting whatever is already at that path.
/// Entry kinds come straight from the tree, so no byte-sniffing is ever
/// needed to tell a file from a directory. The walk is stateless and
/// purely recursive: a missing object or I/O failure aborts immediately,
/// leaving whatever was restored so far in place.
pub fn restore_tree(store: &ObjectStore, tree_hash: ObjectHash, target: &Path) -> Result<()> {
    let tree = store.load_tree(tree_hash)?;

    for (name, entry) in tree.entries() {
        let path = target.join(name);
        match entry.kind {
            EntryKind::Tree => {
                if !path.is_dir() {
                    std::fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
                }
                restore_tree(store, entry.hash, &path)?;
            }
            EntryKind::Blob => {
                let blob = store.load_blob(entry.hash)?;
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
                }
                std::fs::write(&path, &blob.data).map_err(|e| Error::io(&path, e))?;
            }
        }
    }

    Ok(())
}

/// Remove everything in the working directory except the repository
/// metadata directory.
fn clear_workdir(repo: &Repository) -> Result<()> {
    let root = repo.root();
    let read_dir = std::fs::read_dir(root).map_err(|e| Error::io(root, e))?;

    for entry in read_dir {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        if entry.file_name() == META_DIR {
            continue;
        }
        let path = entry.path();
        let meta = std::fs::symlink_metadata(&path).map_err(|e| Error::io(&path, e))?;
        if meta.is_dir() {
            std::fs::remove_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        } else {
            std::fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        }
    }

    Ok(())
}

/// Switch to a branch: update HEAD, then replace the working directory
/// with the branch tip's snapshot.
///
/// This is a destructive full replace, not a merge: every
/// working-directory entry other than the metadata directory is deleted
/// before the snapshot is written back, so uncommitted local changes are
/// lost with no backup. There is no dirty-check and no rollback; callers
/// that need a warning must check for local changes themselves before
/// invoking this. If restoration fails partway the working directory is
/// left half-restored and should be treated as untrustworthy until a
/// fresh restore completes.
///
/// A branch with no commits yet only updates HEAD and leaves the working
/// directory untouched.
///
/// # Errors
/// Returns [`Error::Ref`] if the branch does not exist.
pub fn checkout_branch(repo: &Repository, branch: &str) -> Result<()> {
    let _lock = repo.lock()?;

    repo.branches().switch(branch)?;

    let Some(commit_hash) = repo.head_commit()? else {
        // Empty branch: nothing to restore.
        return Ok(());
    };

    let store = repo.objects();
    let commit = store.load_commit(commit_hash)?;

    info!("checkout {} -> commit {}", branch, commit_hash);
    clear_workdir(repo)?;
    restore_tree(&store, commit.tree, repo.root())
}
