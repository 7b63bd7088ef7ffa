//! Length-extension forgery against [`crate::mac::prefix`].
//!
//! A SHA-256 digest *is* the chaining value after the last block. Given
//! `mac = H(key ‖ message)` and the key length, an attacker can:
//!
//! 1. rebuild the padding that followed `key ‖ message` (the glue),
//! 2. load `mac` as the chaining value,
//! 3. keep hashing a chosen suffix, with a length field covering everything before it.
//!
//! The result is `H(key ‖ message ‖ glue ‖ suffix)`, computed without the key.
//!
//! # Examples
//!
//! ```
//! use sha256_lenext::extension::forge;
//! use sha256_lenext::mac::compute_mac;
//!
//! let mac = compute_mac(b"secret", b"user=bob").to_hex();
//! let forgery = forge(&mac, 6, b"user=bob", b";admin=true").unwrap();
//! assert_eq!(compute_mac(b"secret", forgery.message()), forgery.digest());
//! ```

use std::ops::Range;

use log::debug;

use crate::error::{Error, Result};
use crate::sha256::{glue_padding, hash_with, Digest, HashState};

/// Bytes of the length field at the end of the glue.
const LENGTH_FIELD_LEN: usize = 8;

/// A forged message together with the MAC it will verify under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forgery {
    digest: Digest,
    /// `message ‖ glue ‖ suffix`
    message: Vec<u8>,
    glue: Range<usize>,
}

impl Forgery {
    /// The MAC that `key ‖ message()` hashes to.
    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// The bytes to submit alongside [`Forgery::digest`]. Never contains the key.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Takes the forged bytes, dropping the digest.
    pub fn into_message(self) -> Vec<u8> {
        self.message
    }

    /// The padding inserted between the known message and the suffix.
    pub fn glue(&self) -> &[u8] {
        &self.message[self.glue.clone()]
    }

    /// The attacker-chosen tail.
    pub fn suffix(&self) -> &[u8] {
        &self.message[self.glue.end..]
    }

    /// Renders the forged message for a terminal.
    ///
    /// Printable ASCII before the suffix is kept, other bytes become `\xHH`. The glue's
    /// length field is always escaped. The suffix is appended as-is, except for bytes
    /// that are not valid UTF-8, which are escaped too.
    pub fn escaped(&self) -> String {
        let length_field = self.glue.end - LENGTH_FIELD_LEN;
        let mut out = String::with_capacity(self.message.len() * 2);

        for &byte in &self.message[..length_field] {
            if byte == b' ' || byte.is_ascii_graphic() {
                out.push(char::from(byte));
            } else {
                out.push_str(&format!("\\x{byte:02x}"));
            }
        }
        for &byte in &self.message[length_field..self.glue.end] {
            out.push_str(&format!("\\x{byte:02x}"));
        }
        for chunk in self.suffix().utf8_chunks() {
            out.push_str(chunk.valid());
            for byte in chunk.invalid() {
                out.push_str(&format!("\\x{byte:02x}"));
            }
        }
        out
    }
}

/// Forges MACs from one leaked `H(key ‖ message)`.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionAttack {
    leaked: HashState,
    key_len: usize,
}

impl ExtensionAttack {
    /// Parses `leaked_mac` into a chaining value.
    ///
    /// Fails if `key_len` is zero or the MAC is not exactly 64 hex characters.
    pub fn new(leaked_mac: &str, key_len: usize) -> Result<Self> {
        if key_len == 0 {
            return Err(Error::InvalidKeyLength(key_len));
        }
        let leaked = HashState::from_hex(leaked_mac)?;
        Ok(Self { leaked, key_len })
    }

    /// Uses an already parsed chaining value. Fails if `key_len` is zero.
    pub fn from_state(leaked: HashState, key_len: usize) -> Result<Self> {
        if key_len == 0 {
            return Err(Error::InvalidKeyLength(key_len));
        }
        Ok(Self { leaked, key_len })
    }

    /// Assumed length of the secret key in bytes.
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// Extends `message` (the part after the key that produced the leaked MAC) with
    /// `suffix`.
    pub fn forge(&self, message: &[u8], suffix: &[u8]) -> Forgery {
        let key_bits = (self.key_len as u64).wrapping_mul(8);
        let glue = glue_padding(message.len(), self.key_len, key_bits);

        let consumed_bits = (self.key_len as u64)
            .wrapping_add(message.len() as u64)
            .wrapping_add(glue.len() as u64)
            .wrapping_mul(8);
        debug!(
            "forging with key_len={} message_len={} glue_len={} consumed_bits={}",
            self.key_len,
            message.len(),
            glue.len(),
            consumed_bits
        );

        let digest = hash_with(suffix, self.leaked, consumed_bits);

        let glue_start = message.len();
        let glue_end = glue_start + glue.len();
        let mut forged = Vec::with_capacity(glue_end + suffix.len());
        forged.extend_from_slice(message);
        forged.extend_from_slice(&glue);
        forged.extend_from_slice(suffix);

        Forgery {
            digest,
            message: forged,
            glue: glue_start..glue_end,
        }
    }

    /// One forgery per guessed key length, for when the real length is unknown.
    ///
    /// Zero is skipped. Exactly one candidate verifies if the real length is in range.
    pub fn candidates<'a, I>(
        leaked: HashState,
        key_lens: I,
        message: &'a [u8],
        suffix: &'a [u8],
    ) -> impl Iterator<Item = (usize, Forgery)> + 'a
    where
        I: IntoIterator<Item = usize>,
        I::IntoIter: 'a,
    {
        key_lens.into_iter().filter_map(move |key_len| {
            Self::from_state(leaked, key_len)
                .ok()
                .map(|attack| (key_len, attack.forge(message, suffix)))
        })
    }
}

/// Parses `leaked_mac` and forges in one step.
pub fn forge(leaked_mac: &str, key_len: usize, message: &[u8], suffix: &[u8]) -> Result<Forgery> {
    Ok(ExtensionAttack::new(leaked_mac, key_len)?.forge(message, suffix))
}
