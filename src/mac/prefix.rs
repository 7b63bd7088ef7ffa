//! DISCLAIMER: A secret-prefix MAC is forgeable by length extension. It exists here as
//! the target of [`crate::extension`]. Do not authenticate anything with it.

use rand::Rng;

use crate::sha256::{Digest, Sha256};

/// Computes `SHA-256(key ‖ message)`.
pub fn compute_mac(key: &[u8], message: &[u8]) -> Digest {
    Sha256::new().chain_update(key).chain_update(message).finalize()
}

/// Recomputes the MAC and compares its hex form with `claimed`.
///
/// The comparison is plain string equality: a different length, uppercase hex or any
/// other deviation is a mismatch. It is not constant-time.
pub fn verify_mac(key: &[u8], message: &[u8], claimed: &str) -> bool {
    compute_mac(key, message).to_hex() == claimed
}

/// A party holding a secret key that signs and verifies messages.
///
/// Only the key length is observable from outside.
#[derive(Clone)]
pub struct SecretPrefixMac {
    key: Vec<u8>,
}

impl SecretPrefixMac {
    /// Holds `key` as the secret prefix.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// Draws a random key of `key_len` bytes.
    pub fn generate<R: Rng>(key_len: usize, rng: &mut R) -> Self {
        let mut key = vec![0u8; key_len];
        rng.fill(key.as_mut_slice());
        Self { key }
    }

    /// Length of the key in bytes, the only thing an attacker needs.
    pub fn key_len(&self) -> usize {
        self.key.len()
    }

    /// MAC of `message` under the held key.
    pub fn sign(&self, message: &[u8]) -> Digest {
        compute_mac(&self.key, message)
    }

    /// Checks `claimed` against the MAC of `message`.
    pub fn verify(&self, message: &[u8], claimed: &str) -> bool {
        verify_mac(&self.key, message, claimed)
    }
}

impl core::fmt::Debug for SecretPrefixMac {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretPrefixMac")
            .field("key_len", &self.key.len())
            .finish_non_exhaustive()
    }
}
