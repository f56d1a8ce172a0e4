use std::fs::{File, OpenOptions};
use std::path::Path;

use fs2::FileExt;

use crate::error::{Error, Result};

/// Exclusive advisory lock on a repository, released on drop.
///
/// Serializes mutating operations (staging, commit, checkout, branch
/// create/delete) across processes. Reads stay lock-free: objects are
/// write-once and never mutated. The guard must not be re-acquired while
/// already held by the same process, so internal helpers called from a
/// locked section never take it themselves.
pub struct RepoLock {
    file: File,
}

impl RepoLock {
    /// Acquire the lock file, blocking until it is available.
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .map_err(|e| Error::io(path, e))?;
        file.lock_exclusive().map_err(|e| Error::io(path, e))?;
        Ok(Self { file })
    }
}

impl Drop for RepoLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
