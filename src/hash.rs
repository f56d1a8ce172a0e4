use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

/// Number of bytes in an object digest.
pub const HASH_LEN: usize = 20;

/// Content digest identifying an immutable stored object.
///
/// A SHA-1 digest of an object's canonical serialization. The hash is
/// computed once when the object is stored and never recomputed afterwards;
/// it serves as both identity and lookup key.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectHash([u8; HASH_LEN]);

impl ObjectHash {
    pub const fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Lowercase hex rendering (40 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 40-character lowercase or uppercase hex string.
    ///
    /// # Errors
    /// Returns [`Error::InvalidObject`] on wrong length or non-hex input.
    pub fn from_hex(s: &str) -> Result<Self> {
        let raw = hex::decode(s)
            .map_err(|e| Error::invalid_object(format!("bad object hash {:?}: {}", s, e)))?;
        let bytes: [u8; HASH_LEN] = raw.try_into().map_err(|_| {
            Error::invalid_object(format!(
                "bad object hash {:?}: expected {} hex characters",
                s,
                HASH_LEN * 2
            ))
        })?;
        Ok(Self(bytes))
    }
}

/// Digest raw object bytes.
pub fn hash_bytes(data: &[u8]) -> ObjectHash {
    let mut hasher = Sha1::new();
    hasher.update(data);
    ObjectHash(hasher.finalize().into())
}

impl fmt::Display for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHash({})", self.to_hex())
    }
}

impl FromStr for ObjectHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// Hashes travel as hex strings in serialized trees and commits.
impl Serialize for ObjectHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(hash_bytes(b"hello"), hash_bytes(b"hello"));
        assert_ne!(hash_bytes(b"hello"), hash_bytes(b"world"));
    }

    #[test]
    fn hex_roundtrip() {
        let hash = hash_bytes(b"content");
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 40);
        assert_eq!(ObjectHash::from_hex(&hex).unwrap(), hash);
    }

    #[test]
    fn hex_is_lowercase() {
        let hex = hash_bytes(b"abc").to_hex();
        assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(ObjectHash::from_hex("").is_err());
        assert!(ObjectHash::from_hex("abcd").is_err());
        assert!(ObjectHash::from_hex(&"g".repeat(40)).is_err());
        assert!(ObjectHash::from_hex(&"a".repeat(41)).is_err());
    }

    #[test]
    fn display_matches_hex() {
        let hash = hash_bytes(b"display");
        assert_eq!(format!("{}", hash), hash.to_hex());
    }

    #[test]
    fn known_digest() {
        // sha1("hello world")
        assert_eq!(
            hash_bytes(b"hello world").to_hex(),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
    }
}
