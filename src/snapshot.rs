//! Snapshot builder: turns the flat staged map (`dir/file.txt` → blob hash)
//! into a nested tree DAG in the object store.
//!
//! Directory levels are assembled as typed nodes first, then emitted
//! post-order, children before parents, so every hash a tree references
//! already exists in the store by the time the tree itself is written.
//! Equal staged sets produce the same root hash regardless of insertion
//! order.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::hash::ObjectHash;
use crate::object::{Tree, TreeEntry};
use crate::store::ObjectStore;

/// One node of the in-memory directory hierarchy: either a file leaf
/// holding its content hash, or a directory of named children.
enum Node {
    Leaf(ObjectHash),
    Dir(BTreeMap<String, Node>),
}

/// Assembles staged paths into a directory hierarchy, then writes it out
/// as stored [`Tree`] objects.
#[derive(Default)]
pub struct SnapshotBuilder {
    root: BTreeMap<String, Node>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }

    /// Insert a staged path, creating intermediate directory nodes as
    /// needed.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`] if the path is malformed or if a
    /// name would have to be both a file and a directory.
    pub fn insert(&mut self, path: &str, blob: ObjectHash) -> Result<()> {
        let normalized = crate::paths::normalize_path(path)?;
        let segments: Vec<&str> = normalized.split('/').collect();
        let Some((leaf, dirs)) = segments.split_last() else {
            return Err(Error::invalid_path(path));
        };

        let mut current = &mut self.root;
        for (i, seg) in dirs.iter().enumerate() {
            let node = current
                .entry((*seg).to_string())
                .or_insert_with(|| Node::Dir(BTreeMap::new()));
            match node {
                Node::Dir(children) => current = children,
                Node::Leaf(_) => {
                    return Err(Error::invalid_path(format!(
                        "'{}' is staged as both a file and a directory",
                        segments[..=i].join("/")
                    )));
                }
            }
        }

        match current.get(*leaf) {
            Some(Node::Dir(_)) => Err(Error::invalid_path(format!(
                "'{}' is staged as both a file and a directory",
                normalized
            ))),
            _ => {
                current.insert((*leaf).to_string(), Node::Leaf(blob));
                Ok(())
            }
        }
    }

    /// Serialize and store every directory level, children first, and
    /// return the root tree's hash.
    pub fn write(&self, store: &ObjectStore) -> Result<ObjectHash> {
        write_dir(&self.root, store)
    }
}

fn write_dir(children: &BTreeMap<String, Node>, store: &ObjectStore) -> Result<ObjectHash> {
    let mut tree = Tree::new();
    for (name, node) in children {
        match node {
            Node::Leaf(hash) => tree.insert(name.clone(), TreeEntry::blob(*hash)),
            Node::Dir(grandchildren) => {
                let subtree = write_dir(grandchildren, store)?;
                tree.insert(name.clone(), TreeEntry::tree(subtree));
            }
        }
    }
    store.store_tree(&tree)
}

/// Build and store the tree DAG for a staged set, returning the root hash.
pub fn build_snapshot(
    entries: &BTreeMap<String, ObjectHash>,
    store: &ObjectStore,
) -> Result<ObjectHash> {
    let mut builder = SnapshotBuilder::new();
    for (path, blob) in entries {
        builder.insert(path, *blob)?;
    }
    builder.write(store)
}
