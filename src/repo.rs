//! Repository context: the root path and every metadata location derived
//! from it. A [`Repository`] value is passed explicitly into each
//! operation; there is no ambient or global repository state.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use crate::index::Index;
use crate::lock::RepoLock;
use crate::refs::Branches;
use crate::store::ObjectStore;

/// Name of the metadata directory at the repository root.
pub const META_DIR: &str = ".rivet";
/// Branch created by `init`.
pub const DEFAULT_BRANCH: &str = "main";

pub(crate) const HEAD_PREFIX: &str = "refs/heads/";

/// An initialized repository: working root plus metadata locations.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
    meta_dir: PathBuf,
    objects_dir: PathBuf,
    heads_dir: PathBuf,
    head_file: PathBuf,
    index_file: PathBuf,
    lock_file: PathBuf,
}

impl Repository {
    fn from_root(root: PathBuf) -> Self {
        let meta_dir = root.join(META_DIR);
        Self {
            objects_dir: meta_dir.join("objects"),
            heads_dir: meta_dir.join("refs").join("heads"),
            head_file: meta_dir.join("HEAD"),
            index_file: meta_dir.join("index"),
            lock_file: meta_dir.join("lock"),
            meta_dir,
            root,
        }
    }

    /// Initialize a new repository at `path`.
    ///
    /// Creates the metadata layout, points `HEAD` at the default branch,
    /// and seeds an empty branch ref and an empty staging index.
    ///
    /// # Errors
    /// Returns [`Error::Repository`] if `path` already holds a repository.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let repo = Self::from_root(root);

        if repo.meta_dir.exists() {
            return Err(Error::repository(format!(
                "repository already initialized at {}",
                repo.root.display()
            )));
        }

        std::fs::create_dir_all(&repo.objects_dir).map_err(|e| Error::io(&repo.objects_dir, e))?;
        std::fs::create_dir_all(&repo.heads_dir).map_err(|e| Error::io(&repo.heads_dir, e))?;

        std::fs::write(&repo.head_file, format!("{}{}", HEAD_PREFIX, DEFAULT_BRANCH))
            .map_err(|e| Error::io(&repo.head_file, e))?;
        // An empty ref file marks a branch with no commits yet.
        let main_ref = repo.heads_dir.join(DEFAULT_BRANCH);
        std::fs::write(&main_ref, "").map_err(|e| Error::io(&main_ref, e))?;
        std::fs::write(&repo.index_file, "").map_err(|e| Error::io(&repo.index_file, e))?;

        debug!("initialized repository at {}", repo.root.display());
        Ok(repo)
    }

    /// Locate a repository by walking up from `start`.
    ///
    /// # Errors
    /// Returns [`Error::Repository`] when no ancestor of `start` contains a
    /// metadata directory.
    pub fn find(start: impl AsRef<Path>) -> Result<Self> {
        let start = start.as_ref();
        let mut current = start
            .canonicalize()
            .map_err(|e| Error::io(start, e))?;

        loop {
            if current.join(META_DIR).is_dir() {
                return Ok(Self::from_root(current));
            }
            if !current.pop() {
                return Err(Error::repository("not inside a rivet repository"));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Working-directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Metadata directory (`<root>/.rivet`).
    pub fn meta_dir(&self) -> &Path {
        &self.meta_dir
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    pub fn heads_dir(&self) -> &Path {
        &self.heads_dir
    }

    pub fn head_file(&self) -> &Path {
        &self.head_file
    }

    pub fn index_file(&self) -> &Path {
        &self.index_file
    }

    /// The content-addressed object store for this repository.
    pub fn objects(&self) -> ObjectStore {
        ObjectStore::new(self)
    }

    /// Dictionary-style view of the branch refs.
    pub fn branches(&self) -> Branches<'_> {
        Branches::new(self)
    }

    /// Load the staging index from disk.
    pub fn index(&self) -> Result<Index> {
        Index::load(self)
    }

    /// Take the per-repository exclusive lock.
    ///
    /// Held by every mutating operation for its duration; dropped guards
    /// release it.
    pub fn lock(&self) -> Result<RepoLock> {
        RepoLock::acquire(&self.lock_file)
    }

    // -----------------------------------------------------------------------
    // HEAD resolution
    // -----------------------------------------------------------------------

    /// Name of the currently checked-out branch.
    ///
    /// # Errors
    /// Returns [`Error::Repository`] if the HEAD file is missing or holds
    /// anything other than a `refs/heads/` reference; a detached (bare
    /// commit hash) HEAD is explicitly unsupported.
    pub fn current_branch(&self) -> Result<String> {
        let content = match std::fs::read_to_string(&self.head_file) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::repository("HEAD file missing"));
            }
            Err(e) => return Err(Error::io(&self.head_file, e)),
        };

        let reference = content.trim();
        match reference.strip_prefix(HEAD_PREFIX) {
            Some(branch) if !branch.is_empty() => Ok(branch.to_string()),
            _ => Err(Error::repository("detached HEAD is not supported")),
        }
    }

    /// Path of the current branch's ref file.
    pub fn head_ref_path(&self) -> Result<PathBuf> {
        Ok(self.heads_dir.join(self.current_branch()?))
    }

    /// Hash of the current branch tip, or `None` for a branch with no
    /// commits yet.
    pub fn head_commit(&self) -> Result<Option<ObjectHash>> {
        let ref_path = self.head_ref_path()?;
        let content = match std::fs::read_to_string(&ref_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&ref_path, e)),
        };

        let tip = content.trim();
        if tip.is_empty() {
            return Ok(None);
        }
        Ok(Some(ObjectHash::from_hex(tip)?))
    }
}
