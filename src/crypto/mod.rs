//! Cryptographic operations for node key generation and identifier derivation.
//!
//! This module provides:
//! - Secure random ed25519 key generation
//! - Node address derivation from public keys
//! - Tree identifiers (SHA-512 of the public key)

mod address;
mod keypair;
mod tree_id;

pub use address::{addr_for_key, Address, AddressDeriver, YggdrasilDeriver, ADDRESS_LEN};
pub use keypair::{
    KeySource, KeygenError, Keypair, OsKeySource, PublicKey, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN,
};
pub use tree_id::{TreeId, TREE_ID_LEN};
