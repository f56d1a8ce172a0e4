//! Content-addressed object storage.
//!
//! Objects are keyed by the digest of their raw bytes and laid out as
//! `objects/<first-2-hex>/<remaining-hex>`, one file per object, sharded by
//! prefix to bound directory fan-out. An object is written exactly once:
//! storing identical bytes again is a no-op that returns the same hash.
//! Writes go through a temporary file in the objects directory followed by
//! an atomic rename, so a crash cannot leave a half-written file under a
//! content-addressed path.

use std::io::Write;
use std::path::PathBuf;

use log::debug;

use crate::error::{Error, Result};
use crate::hash::{hash_bytes, ObjectHash};
use crate::object::{Blob, Commit, Tree};
use crate::repo::Repository;

/// Write-once, deduplicating byte store keyed by content digest.
pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    pub fn new(repo: &Repository) -> Self {
        Self {
            objects_dir: repo.objects_dir().to_path_buf(),
        }
    }

    fn object_path(&self, hash: ObjectHash) -> PathBuf {
        let hex = hash.to_hex();
        let (prefix, rest) = hex.split_at(2);
        self.objects_dir.join(prefix).join(rest)
    }

    /// Store raw object bytes and return their hash.
    ///
    /// Idempotent: if the object already exists nothing is written and the
    /// same hash comes back.
    pub fn store(&self, data: &[u8]) -> Result<ObjectHash> {
        let hash = hash_bytes(data);
        let path = self.object_path(hash);

        if path.exists() {
            return Ok(hash);
        }

        let hex = hash.to_hex();
        let shard_dir = self.objects_dir.join(&hex[..2]);
        std::fs::create_dir_all(&shard_dir).map_err(|e| Error::io(&shard_dir, e))?;

        // Write-to-temp-then-rename keeps a partially written object from
        // ever appearing under its content-addressed path.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.objects_dir)
            .map_err(|e| Error::io(&self.objects_dir, e))?;
        tmp.write_all(data).map_err(|e| Error::io(&path, e))?;
        tmp.persist(&path)
            .map_err(|e| Error::io(&path, e.error))?;

        debug!("stored object {} ({} bytes)", hash, data.len());
        Ok(hash)
    }

    /// Load raw object bytes by hash.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the digest is absent from the store.
    pub fn load(&self, hash: ObjectHash) -> Result<Vec<u8>> {
        let path = self.object_path(hash);
        match std::fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::not_found(hash.to_hex()))
            }
            Err(e) => Err(Error::io(&path, e)),
        }
    }

    /// Existence probe; no side effects.
    pub fn exists(&self, hash: ObjectHash) -> bool {
        self.object_path(hash).exists()
    }

    // -----------------------------------------------------------------------
    // Typed helpers
    // -----------------------------------------------------------------------

    pub fn store_blob(&self, blob: &Blob) -> Result<ObjectHash> {
        self.store(blob.serialize())
    }

    pub fn store_tree(&self, tree: &Tree) -> Result<ObjectHash> {
        self.store(&tree.serialize()?)
    }

    pub fn store_commit(&self, commit: &Commit) -> Result<ObjectHash> {
        self.store(&commit.serialize()?)
    }

    pub fn load_blob(&self, hash: ObjectHash) -> Result<Blob> {
        Ok(Blob::deserialize(&self.load(hash)?))
    }

    /// # Errors
    /// [`Error::NotFound`] if the hash is absent, [`Error::InvalidObject`]
    /// if the stored bytes are not a tree.
    pub fn load_tree(&self, hash: ObjectHash) -> Result<Tree> {
        Tree::deserialize(&self.load(hash)?)
    }

    /// # Errors
    /// [`Error::NotFound`] if the hash is absent, [`Error::InvalidObject`]
    /// if the stored bytes are not a commit.
    pub fn load_commit(&self, hash: ObjectHash) -> Result<Commit> {
        Commit::deserialize(&self.load(hash)?)
    }
}
