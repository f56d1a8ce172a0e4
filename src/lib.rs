//! A minimal content-addressed version-control engine.
//!
//! `rivet` stores file contents as immutable, content-addressed objects
//! and models snapshots as a hash-referenced DAG of blobs, trees, and
//! commits. Staging, committing, branching, and checkout are built on top
//! of four small pieces:
//!
//! - [`ObjectStore`] — write-once, deduplicating byte storage keyed by
//!   content digest.
//! - [`Blob`] / [`Tree`] / [`Commit`] — the object model, with canonical
//!   serialization so equal content always hashes identically.
//! - [`SnapshotBuilder`] — flat staged-path map → nested tree DAG.
//! - [`checkout::restore_tree`] — tree hash → filesystem.
//!
//! A [`Repository`] value carries the root path and metadata locations and
//! is passed explicitly into every operation.
//!
//! # Quick example
//!
//! ```rust,no_run
//! use rivet::{create_commit, Repository};
//!
//! let repo = Repository::init("/tmp/project").unwrap();
//! let store = repo.objects();
//!
//! // Stage a file and commit it.
//! let mut index = repo.index().unwrap();
//! index.add("/tmp/project/hello.txt", &store).unwrap();
//! let hash = create_commit(&repo, "first commit").unwrap();
//! println!("committed {}", hash);
//! ```

pub mod checkout;
pub mod commit;
pub mod diff;
pub mod error;
pub mod hash;
pub mod index;
pub mod lock;
pub mod object;
pub mod paths;
pub mod refs;
pub mod repo;
pub mod snapshot;
pub mod status;
pub mod store;

// Re-export primary public types at crate root.
pub use checkout::{checkout_branch, restore_tree};
pub use commit::{create_commit, history};
pub use diff::{diff_working_vs_index, DiffEntry};
pub use error::{Error, Result};
pub use hash::{hash_bytes, ObjectHash};
pub use index::Index;
pub use lock::RepoLock;
pub use object::{Blob, Commit, EntryKind, ObjectKind, Tree, TreeEntry};
pub use refs::Branches;
pub use repo::Repository;
pub use snapshot::{build_snapshot, SnapshotBuilder};
pub use status::{head_snapshot, status, Status};
pub use store::ObjectStore;
