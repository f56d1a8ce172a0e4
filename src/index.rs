//! The staging index: the mutable path → blob-hash map describing the next
//! snapshot to commit. Persisted as sorted JSON at `<meta>/index`; a
//! missing or empty file means nothing is staged.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use crate::object::Blob;
use crate::repo::Repository;
use crate::store::ObjectStore;

/// Staged path → blob hash mapping, keyed by POSIX-style paths relative to
/// the repository root.
pub struct Index {
    repo: Repository,
    entries: BTreeMap<String, ObjectHash>,
}

impl Index {
    /// Load the index from disk.
    pub fn load(repo: &Repository) -> Result<Self> {
        let entries = match std::fs::read_to_string(repo.index_file()) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| Error::staging(format!("corrupt index file: {}", e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io(repo.index_file(), e)),
        };

        Ok(Self {
            repo: repo.clone(),
            entries,
        })
    }

    fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| Error::staging(format!("cannot encode index: {}", e)))?;
        std::fs::write(self.repo.index_file(), content)
            .map_err(|e| Error::io(self.repo.index_file(), e))?;
        Ok(())
    }

    /// Staged entries, sorted by path.
    pub fn entries(&self) -> &BTreeMap<String, ObjectHash> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage a file: store its content as a blob and record the mapping.
    ///
    /// # Errors
    /// Returns [`Error::Staging`] if the target does not exist, is not a
    /// regular file, or lies outside the repository root.
    pub fn add(&mut self, path: impl AsRef<Path>, store: &ObjectStore) -> Result<()> {
        let _lock = self.repo.lock()?;

        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::staging(format!("file not found: {}", path.display())));
        }
        let path = path.canonicalize().map_err(|e| Error::io(path, e))?;
        if !path.is_file() {
            return Err(Error::staging(format!(
                "only regular files can be staged: {}",
                path.display()
            )));
        }

        let root = self
            .repo
            .root()
            .canonicalize()
            .map_err(|e| Error::io(self.repo.root(), e))?;
        let rel = path.strip_prefix(&root).map_err(|_| {
            Error::staging(format!(
                "file must be inside the repository: {}",
                path.display()
            ))
        })?;
        let rel = rel_to_posix(rel)?;

        let data = std::fs::read(&path).map_err(|e| Error::io(&path, e))?;
        let blob_hash = store.store_blob(&Blob::new(data))?;

        debug!("staged {} -> {}", rel, blob_hash);
        self.entries.insert(rel, blob_hash);
        self.save()
    }

    /// Unstage a path (given relative to the repository root).
    ///
    /// # Errors
    /// Returns [`Error::Staging`] if the path is not currently staged.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        let _lock = self.repo.lock()?;

        let rel = crate::paths::normalize_path(path)?;
        if self.entries.remove(&rel).is_none() {
            return Err(Error::staging(format!("path is not staged: {}", rel)));
        }
        self.save()
    }

    /// Drop every staged entry.
    ///
    /// Called from the commit path with the repository lock already held,
    /// so it does not take the lock itself.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }
}

/// Render a relative filesystem path as a slash-delimited string.
fn rel_to_posix(rel: &Path) -> Result<String> {
    let mut segments = Vec::new();
    for component in rel.components() {
        let seg = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| Error::staging(format!("non-UTF-8 path: {}", rel.display())))?;
        segments.push(seg);
    }
    crate::paths::normalize_path(&segments.join("/"))
}
