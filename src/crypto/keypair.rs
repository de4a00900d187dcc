//! ed25519 keypair generation.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;

/// Length of an ed25519 public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of the expanded private key (`seed || public key`).
pub const PRIVATE_KEY_LEN: usize = 64;

/// Raw ed25519 public key bytes.
pub type PublicKey = [u8; PUBLIC_KEY_LEN];

/// Errors raised while producing keypairs.
#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("entropy source failure: {0}")]
    EntropySource(#[from] rand::Error),
}

/// An ed25519 keypair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    /// Seed followed by the public key (64 bytes)
    private_key: [u8; PRIVATE_KEY_LEN],
    /// The public key (32 bytes)
    public_key: PublicKey,
}

impl Keypair {
    /// Generates a new random keypair from the operating system RNG.
    ///
    /// Fails only when the RNG itself fails; callers treat that as fatal.
    pub fn generate() -> Result<Self, KeygenError> {
        let mut seed = [0u8; 32];
        OsRng.try_fill_bytes(&mut seed)?;
        Ok(Self::from_seed(&seed))
    }

    /// Derives a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self {
            private_key: signing_key.to_keypair_bytes(),
            public_key: signing_key.verifying_key().to_bytes(),
        }
    }

    /// Builds a keypair from raw parts without checking that they belong together.
    pub const fn from_parts(private_key: [u8; PRIVATE_KEY_LEN], public_key: PublicKey) -> Self {
        Self {
            private_key,
            public_key,
        }
    }

    /// Returns the private key as a hex string.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.private_key)
    }

    /// Returns the public key as a hex string.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    pub fn private_key_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.private_key
    }

    #[inline]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// Something that hands out keypairs, one per call.
pub trait KeySource {
    fn next_keypair(&mut self) -> Result<Keypair, KeygenError>;
}

/// Key source backed by the operating system RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsKeySource;

impl KeySource for OsKeySource {
    #[inline]
    fn next_keypair(&mut self) -> Result<Keypair, KeygenError> {
        Keypair::generate()
    }
}
