//! The SHA-256 chaining value and the digest it serializes to.

use core::fmt;
use core::str::FromStr;

use super::SHA256_OUTPUT_SIZE;
use crate::error::{Error, Result};

/// Length of a digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = SHA256_OUTPUT_SIZE * 2;

/// Eight 32-bit words `a..h` carried from one block to the next.
///
/// Every hash computation owns its own value; the compression function takes it by
/// value and hands back the updated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashState([u32; 8]);

impl HashState {
    /// The initial hash value H(0): first 32 bits of the fractional parts of the
    /// square roots of the first eight primes.
    pub const INITIAL: HashState = HashState([
        0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
        0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
    ]);

    /// Wraps eight raw chaining words.
    pub const fn new(words: [u32; 8]) -> Self {
        Self(words)
    }

    /// The words `a..h` in order.
    pub const fn words(&self) -> &[u32; 8] {
        &self.0
    }

    /// Parses a 64-character hex digest back into the state that produced it.
    pub fn from_hex(s: &str) -> Result<Self> {
        s.parse::<Digest>().map(Self::from)
    }

    /// Serializes the state big-endian, 4 bytes per word.
    pub fn to_digest(&self) -> Digest {
        let mut out = [0u8; SHA256_OUTPUT_SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Digest(out)
    }
}

impl Default for HashState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl From<Digest> for HashState {
    fn from(digest: Digest) -> Self {
        let mut words = [0u32; 8];
        for (word, chunk) in words.iter_mut().zip(digest.0.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(words)
    }
}

impl From<HashState> for Digest {
    fn from(state: HashState) -> Self {
        state.to_digest()
    }
}

/// A finished SHA-256 digest. Displays as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; SHA256_OUTPUT_SIZE]);

impl Digest {
    /// Wraps 32 raw digest bytes.
    pub const fn from_bytes(bytes: [u8; SHA256_OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }

    /// The raw digest bytes.
    pub const fn as_bytes(&self) -> &[u8; SHA256_OUTPUT_SIZE] {
        &self.0
    }

    /// Lowercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Digest {
    type Err = Error;

    /// Accepts exactly 64 hex digits. Anything shorter, longer or non-hex is rejected
    /// rather than truncated.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(Error::InvalidDigestLength {
                expected: DIGEST_HEX_LEN,
                length: s.len(),
            });
        }

        let mut bytes = [0u8; SHA256_OUTPUT_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                Error::InvalidDigestCharacter { character: c, index }
            }
            other => Error::InvalidInput(other.to_string()),
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}
