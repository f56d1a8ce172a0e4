//! The stored object model: blobs, trees, and commits.
//!
//! Trees and commits serialize to canonical JSON: a leading `"type"`
//! discriminator, fixed field order, and lexicographically sorted entry
//! names (via `BTreeMap`). Logically equal values therefore always produce
//! byte-identical encodings and identical hashes, regardless of
//! construction order. Blobs serialize to their raw payload with no
//! envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hash::ObjectHash;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// The kind of a stored object. A closed set: kind is always known from
/// context (a tree entry or a typed load), never guessed from the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

/// The kind of a tree entry's child.
///
/// Recorded explicitly next to the child hash so the restorer resolves
/// blob-vs-tree in O(1) without attempting to parse the child's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

/// Serialized shape shared by trees and commits. The serde tag is the
/// `"type"` discriminator; deserializing bytes of the wrong variant fails,
/// which is what [`Tree::deserialize`] and [`Commit::deserialize`] turn
/// into [`Error::InvalidObject`].
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Payload {
    Tree {
        entries: BTreeMap<String, TreeEntry>,
    },
    Commit {
        tree: ObjectHash,
        parent: Option<ObjectHash>,
        message: String,
        timestamp: u64,
    },
}

fn encode(payload: &Payload) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(|e| Error::invalid_object(e.to_string()))
}

fn decode(data: &[u8], expected: &str) -> Result<Payload> {
    serde_json::from_slice(data)
        .map_err(|e| Error::invalid_object(format!("not a {} object: {}", expected, e)))
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Stored file content with no internal structure.
///
/// Blobs are content-identified, not path-identified: staging the same
/// bytes under two paths produces one blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// A blob's serialization is its raw payload.
    pub fn serialize(&self) -> &[u8] {
        &self.data
    }

    pub fn deserialize(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// One directory level: entry name → (kind, child hash).
///
/// Names are unique within a tree and kept sorted, which both bounds the
/// canonical encoding and makes iteration deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub hash: ObjectHash,
}

impl TreeEntry {
    pub fn blob(hash: ObjectHash) -> Self {
        Self {
            kind: EntryKind::Blob,
            hash,
        }
    }

    pub fn tree(hash: ObjectHash) -> Self {
        Self {
            kind: EntryKind::Tree,
            hash,
        }
    }
}

/// Stored directory listing, including the synthetic root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: TreeEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    /// Entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TreeEntry)> {
        self.entries.iter().map(|(name, e)| (name.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        encode(&Payload::Tree {
            entries: self.entries.clone(),
        })
    }

    /// # Errors
    /// Returns [`Error::InvalidObject`] when the bytes are not a tree
    /// (missing or mismatched discriminator, malformed encoding).
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        match decode(data, "tree")? {
            Payload::Tree { entries } => Ok(Self { entries }),
            Payload::Commit { .. } => Err(Error::invalid_object(
                "expected a tree object, found a commit",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Immutable snapshot metadata: a root tree, an optional parent, a message
/// and a creation time. Parents form a singly-linked linear history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: ObjectHash,
    pub parent: Option<ObjectHash>,
    pub message: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl Commit {
    pub fn new(
        tree: ObjectHash,
        parent: Option<ObjectHash>,
        message: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            tree,
            parent,
            message: message.into(),
            timestamp,
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        encode(&Payload::Commit {
            tree: self.tree,
            parent: self.parent,
            message: self.message.clone(),
            timestamp: self.timestamp,
        })
    }

    /// # Errors
    /// Returns [`Error::InvalidObject`] when the bytes are not a commit.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        match decode(data, "commit")? {
            Payload::Commit {
                tree,
                parent,
                message,
                timestamp,
            } => Ok(Self {
                tree,
                parent,
                message,
                timestamp,
            }),
            Payload::Tree { .. } => Err(Error::invalid_object(
                "expected a commit object, found a tree",
            )),
        }
    }
}
