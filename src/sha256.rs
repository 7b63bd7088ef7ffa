//! DISCLAIMER: This is a from-scratch SHA-256 (NIST FIPS 180-4) written to show how the
//! Merkle-Damgård construction works and why a secret-prefix MAC built on it is broken.
//! It is *EXCLUSIVELY* for demonstration and educational purposes. It is not constant-time
//! and not audited. If you need SHA-256 in production, use a vetted library (e.g. RustCrypto).
//!
//! The pieces are kept separate on purpose so they can be reused from an arbitrary state:
//!
//! - [`padding`] turns a message into whole 64-byte blocks.
//! - [`compress`] expands one block into the message schedule and runs the 64 rounds.
//! - [`state`] holds the 8-word chaining value and its 32-byte digest form.
//! - [`hasher`] folds the blocks through the compression function.
//!
//! # Examples
//!
//! ```
//! use sha256_lenext::sha256::sha256_digest;
//!
//! let digest = sha256_digest(b"abc");
//! assert_eq!(
//!     digest.to_hex(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! ```

pub mod compress;
pub mod hasher;
pub mod padding;
pub mod state;

/// Size of one compression block in bytes (512 bits).
pub const BLOCK_LEN: usize = 64;

/// Size of the SHA-256 digest in bytes (256 bits).
pub const SHA256_OUTPUT_SIZE: usize = 32;

pub use compress::{compress, compress_block, expand_schedule, Block, MessageSchedule};
pub use hasher::{hash_with, sha256_digest, Sha256};
pub use padding::{glue_padding, pad, pad_offset};
pub use state::{Digest, HashState};
