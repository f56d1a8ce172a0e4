//! Branch bookkeeping: named pointer files under `refs/heads/` plus the
//! symbolic `HEAD`.
//!
//! A branch ref is a text file holding the commit hash the branch points
//! to; an empty file is a branch with no commits yet. `HEAD` holds
//! `refs/heads/<branch>` — a bare commit hash (detached HEAD) is
//! unsupported and rejected by [`Repository::current_branch`].

use std::path::PathBuf;

use log::debug;

use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use crate::repo::{Repository, HEAD_PREFIX};

/// Dictionary-style view over the repository's branches.
pub struct Branches<'a> {
    repo: &'a Repository,
}

impl<'a> Branches<'a> {
    pub(crate) fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    fn ref_path(&self, name: &str) -> PathBuf {
        self.repo.heads_dir().join(name)
    }

    /// All branch names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let heads = self.repo.heads_dir();
        let read_dir = std::fs::read_dir(heads).map_err(|e| Error::io(heads, e))?;

        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| Error::io(heads, e))?;
            if entry.path().is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.ref_path(name).is_file()
    }

    /// Create a branch pointing at the current HEAD commit (or at nothing,
    /// when the current branch has no commits yet).
    ///
    /// # Errors
    /// Returns [`Error::Ref`] if the name is invalid or already taken.
    pub fn create(&self, name: &str) -> Result<()> {
        let _lock = self.repo.lock()?;

        crate::paths::validate_branch_name(name)?;
        let ref_path = self.ref_path(name);
        if ref_path.exists() {
            return Err(Error::ref_error(format!(
                "branch '{}' already exists",
                name
            )));
        }

        let tip = self
            .repo
            .head_commit()?
            .map(|h| h.to_hex())
            .unwrap_or_default();
        std::fs::write(&ref_path, tip).map_err(|e| Error::io(&ref_path, e))?;

        debug!("created branch {}", name);
        Ok(())
    }

    /// Delete a branch.
    ///
    /// # Errors
    /// Returns [`Error::Ref`] when deleting the currently checked-out
    /// branch or one that does not exist.
    pub fn delete(&self, name: &str) -> Result<()> {
        let _lock = self.repo.lock()?;

        if name == self.repo.current_branch()? {
            return Err(Error::ref_error("cannot delete the current branch"));
        }

        let ref_path = self.ref_path(name);
        if !ref_path.exists() {
            return Err(Error::ref_error(format!(
                "branch '{}' does not exist",
                name
            )));
        }
        std::fs::remove_file(&ref_path).map_err(|e| Error::io(&ref_path, e))?;

        debug!("deleted branch {}", name);
        Ok(())
    }

    /// Commit hash the branch points to, or `None` for a branch with no
    /// commits yet.
    ///
    /// # Errors
    /// Returns [`Error::Ref`] if the branch does not exist.
    pub fn tip(&self, name: &str) -> Result<Option<ObjectHash>> {
        let ref_path = self.ref_path(name);
        let content = match std::fs::read_to_string(&ref_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ref_error(format!(
                    "branch '{}' does not exist",
                    name
                )));
            }
            Err(e) => return Err(Error::io(&ref_path, e)),
        };

        let tip = content.trim();
        if tip.is_empty() {
            return Ok(None);
        }
        Ok(Some(ObjectHash::from_hex(tip)?))
    }

    /// Point a branch at a commit. Low-level primitive used by the commit
    /// path; the caller holds the repository lock.
    pub(crate) fn set_tip(&self, name: &str, hash: ObjectHash) -> Result<()> {
        let ref_path = self.ref_path(name);
        std::fs::write(&ref_path, hash.to_hex()).map_err(|e| Error::io(&ref_path, e))?;
        Ok(())
    }

    /// Switch HEAD to the given branch without touching the working
    /// directory. [`checkout_branch`](crate::checkout::checkout_branch) is
    /// the usual entry point and holds the repository lock around this.
    ///
    /// # Errors
    /// Returns [`Error::Ref`] if the branch does not exist.
    pub fn switch(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(Error::ref_error(format!(
                "branch '{}' does not exist",
                name
            )));
        }

        let head = self.repo.head_file();
        std::fs::write(head, format!("{}{}", HEAD_PREFIX, name))
            .map_err(|e| Error::io(head, e))?;
        Ok(())
    }
}
