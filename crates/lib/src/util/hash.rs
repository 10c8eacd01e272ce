//! Content hashing for configuration identifiers.
//!
//! Any serializable value can be reduced to an [`ObjectHash`]: a truncated
//! SHA-256 of its JSON form. Map-backed types serialize in sorted key order,
//! so equal values always produce equal hashes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::PACKAGE_ID_LEN;

pub type HashError = serde_json::Error;

/// A 20-character lowercase hex identifier derived from content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHash(pub String);

impl std::fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<ObjectHash, HashError> {
    let serialized = serde_json::to_string(self)?;
    let digest = Sha256::digest(serialized.as_bytes());
    let full = hex::encode(digest);
    Ok(ObjectHash(full[..PACKAGE_ID_LEN].to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Serialize)]
  struct Sample {
    name: &'static str,
    enabled: bool,
  }

  impl Hashable for Sample {}

  #[test]
  fn hash_is_truncated_hex() {
    let hash = Sample {
      name: "fmt",
      enabled: true,
    }
    .compute_hash()
    .unwrap();

    assert_eq!(hash.0.len(), PACKAGE_ID_LEN);
    assert!(hash.0.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  }

  #[test]
  fn hash_changes_with_content() {
    let on = Sample {
      name: "fmt",
      enabled: true,
    };
    let off = Sample {
      name: "fmt",
      enabled: false,
    };

    assert_ne!(on.compute_hash().unwrap(), off.compute_hash().unwrap());
  }
}
