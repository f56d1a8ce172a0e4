//! Commit orchestration: staged set → tree DAG → commit object → branch
//! tip, plus the parent-link history walk.

use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use crate::object::Commit;
use crate::repo::Repository;
use crate::snapshot::build_snapshot;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Create a commit from the current staging index and advance the current
/// branch to it.
///
/// Builds the snapshot tree from the staged map, stores a commit whose
/// parent is the previous branch tip, updates the branch ref, and clears
/// the staging area. Committing the same staged content twice yields
/// distinct commit hashes (the parent link and timestamp differ) that
/// share an identical tree hash.
///
/// # Errors
/// Returns [`Error::Commit`] when nothing is staged.
pub fn create_commit(repo: &Repository, message: &str) -> Result<ObjectHash> {
    let _lock = repo.lock()?;

    let mut index = repo.index()?;
    if index.is_empty() {
        return Err(Error::commit("nothing to commit"));
    }

    let store = repo.objects();
    let root_tree = build_snapshot(index.entries(), &store)?;
    let parent = repo.head_commit()?;

    let commit = Commit::new(root_tree, parent, message, now_secs());
    let commit_hash = store.store_commit(&commit)?;

    let branch = repo.current_branch()?;
    repo.branches().set_tip(&branch, commit_hash)?;
    index.clear()?;

    info!("committed {} on {}", commit_hash, branch);
    Ok(commit_hash)
}

/// Walk the parent chain from the current branch tip, newest first.
///
/// The walk terminates at the first commit with no parent; each link is
/// loaded from the store, so a broken chain surfaces as [`Error::NotFound`]
/// or [`Error::InvalidObject`].
pub fn history(repo: &Repository) -> Result<Vec<(ObjectHash, Commit)>> {
    let store = repo.objects();
    let mut entries = Vec::new();
    let mut cursor = repo.head_commit()?;

    while let Some(hash) = cursor {
        let commit = store.load_commit(hash)?;
        cursor = commit.parent;
        entries.push((hash, commit));
    }

    Ok(entries)
}
