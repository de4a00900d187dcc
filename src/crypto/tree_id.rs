//! Tree identifiers for the spanning-tree ranking mode.

use std::fmt;

use sha2::{Digest, Sha512};

use super::keypair::PublicKey;

/// Length of a tree identifier.
pub const TREE_ID_LEN: usize = 64;

/// SHA-512 digest of a public key. Higher identifiers sit closer to the tree root.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreeId([u8; TREE_ID_LEN]);

impl TreeId {
    /// Computes the tree identifier for a public key.
    pub fn for_key(public_key: &PublicKey) -> Self {
        let digest = Sha512::digest(public_key);
        let mut bytes = [0u8; TREE_ID_LEN];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; TREE_ID_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; TREE_ID_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeId({})", self.to_hex())
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_id_is_sha512() {
        let key = [0u8; 32];
        let id = TreeId::for_key(&key);
        // sha512 of 32 zero bytes
        assert!(id
            .to_hex()
            .starts_with("5046adc1dba838867b2bbbfdd0c3423e58b57970b5267a90f57960924a87f196"));
        assert_eq!(id.to_hex().len(), TREE_ID_LEN * 2);
    }

    #[test]
    fn test_tree_id_deterministic() {
        let key = [0x42u8; 32];
        assert_eq!(TreeId::for_key(&key), TreeId::for_key(&key));
        assert_ne!(TreeId::for_key(&key), TreeId::for_key(&[0x43u8; 32]));
    }
}
