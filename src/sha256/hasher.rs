//! Chaining blocks through the compression function.

use log::trace;

use super::compress::{compress_block, Block};
use super::padding::pad_offset;
use super::state::{Digest, HashState};
use super::BLOCK_LEN;

/// Hashes `message` starting from `initial_state`.
///
/// `extra_bits` is added to the length field, accounting for data that was already
/// folded into `initial_state`. With [`HashState::INITIAL`] and `0` this is plain
/// SHA-256.
pub fn hash_with(message: &[u8], initial_state: HashState, extra_bits: u64) -> Digest {
    let padded = pad_offset(message, 0, extra_bits);
    trace!(
        "hashing {} bytes as {} blocks",
        message.len(),
        padded.len() / BLOCK_LEN
    );

    padded
        .chunks_exact(BLOCK_LEN)
        .fold(initial_state, |state, chunk| {
            let mut block: Block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            compress_block(state, &block)
        })
        .to_digest()
}

/// Convenience function to compute a SHA-256 digest in a single shot.
pub fn sha256_digest(data: &[u8]) -> Digest {
    hash_with(data, HashState::INITIAL, 0)
}

/// Incremental SHA-256 context.
///
/// Whole blocks are compressed as soon as they are complete; the tail is padded on
/// [`finalize`](Sha256::finalize).
#[derive(Debug, Clone)]
pub struct Sha256 {
    state: HashState,
    /// 64-byte block buffer
    buffer: Block,
    /// Current buffer length
    buffer_len: usize,
    /// Bits already compressed into `state`, mod 2^64
    length_bits: u64,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256 {
    /// Creates a context at the standard initial value.
    pub fn new() -> Self {
        Self::resume(HashState::INITIAL, 0)
    }

    /// Creates a context that continues from `state`, as if `consumed_bits` bits had
    /// already been hashed into it.
    ///
    /// `consumed_bits` must cover whole blocks; it only affects the final length field.
    pub fn resume(state: HashState, consumed_bits: u64) -> Self {
        debug_assert!(
            consumed_bits % (BLOCK_LEN as u64 * 8) == 0,
            "resumed state must cover whole blocks, got {consumed_bits} bits"
        );
        Self {
            state,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            length_bits: consumed_bits,
        }
    }

    /// Current chaining value, excluding any buffered partial block.
    pub fn state(&self) -> HashState {
        self.state
    }

    /// Feeds `data`, compressing every block that fills up.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        let mut data = data.as_ref();

        if self.buffer_len > 0 {
            let take = (BLOCK_LEN - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len < BLOCK_LEN {
                return;
            }
            let block = self.buffer;
            self.process_block(&block);
            self.buffer_len = 0;
        }

        let mut chunks = data.chunks_exact(BLOCK_LEN);
        for chunk in &mut chunks {
            let mut block: Block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            self.process_block(&block);
        }

        let rest = chunks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Builder-style [`update`](Sha256::update).
    pub fn chain_update(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data);
        self
    }

    /// Pads the buffered tail and returns the digest. The context is consumed.
    pub fn finalize(self) -> Digest {
        hash_with(&self.buffer[..self.buffer_len], self.state, self.length_bits)
    }

    fn process_block(&mut self, block: &Block) {
        self.state = compress_block(self.state, block);
        self.length_bits = self.length_bits.wrapping_add((BLOCK_LEN as u64) * 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Known test vectors from FIPS 180-2 appendix B and NIST CAVP

    #[test]
    fn test_sha256_empty() {
        let digest = sha256_digest(b"");
        assert_eq!(
            hex::encode(digest.as_bytes()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_abc() {
        let digest = sha256_digest(b"abc");
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_two_blocks() {
        // 448-bit message, forces a second padding block
        let digest = sha256_digest(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq");
        assert_eq!(
            digest.to_hex(),
            "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
        );
    }

    #[test]
    fn test_sha256_896_bits() {
        let digest = sha256_digest(
            b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu",
        );
        assert_eq!(
            digest.to_hex(),
            "cf5b16a778af8380036ce59e7b0492370b249b11e8f07a51afac45037afee9d1"
        );
    }

    #[test]
    fn test_sha256_quick_brown_fox() {
        let digest = sha256_digest(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(
            digest.to_hex(),
            "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"
        );
    }

    #[test]
    fn test_sha256_million_a() {
        let mut hasher = Sha256::new();
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            hasher.update(chunk);
        }
        assert_eq!(
            hasher.finalize().to_hex(),
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
        );
    }

    #[test]
    fn test_streaming_matches_one_shot_for_every_split() {
        let message: Vec<u8> = (0..=200u8).collect();
        let expected = sha256_digest(&message);
        for split in 0..=message.len() {
            let digest = Sha256::new()
                .chain_update(&message[..split])
                .chain_update(&message[split..])
                .finalize();
            assert_eq!(digest, expected, "split at {split}");
        }
    }

    #[test]
    fn test_streaming_byte_by_byte() {
        let message = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
        let mut hasher = Sha256::default();
        for byte in message.iter() {
            hasher.update([*byte]);
        }
        assert_eq!(hasher.finalize(), sha256_digest(message));
    }

    #[test]
    fn test_parallel_hashing_matches_sequential() {
        use rayon::prelude::*;

        let messages: Vec<Vec<u8>> = (0..256u32)
            .map(|i| i.to_be_bytes().repeat(i as usize % 40))
            .collect();
        let sequential: Vec<Digest> = messages.iter().map(|m| sha256_digest(m)).collect();
        let parallel: Vec<Digest> = messages.par_iter().map(|m| sha256_digest(m)).collect();
        assert_eq!(sequential, parallel);

        // Resumed states running alongside fresh ones must not leak into each other.
        let resumed: Vec<(Digest, Digest)> = messages
            .par_iter()
            .map(|m| {
                let from_iv = sha256_digest(m);
                let from_leak = hash_with(m, HashState::from(from_iv), 512);
                (from_iv, from_leak)
            })
            .collect();
        for ((from_iv, from_leak), m) in resumed.iter().zip(&messages) {
            assert_eq!(*from_iv, sha256_digest(m));
            assert_eq!(*from_leak, hash_with(m, HashState::from(*from_iv), 512));
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "whole blocks")]
    fn test_resume_rejects_partial_block_length() {
        let _ = Sha256::resume(HashState::INITIAL, 100);
    }

    #[test]
    fn test_resume_after_first_block_matches_full_hash() {
        let message = [0x42u8; 100];
        let mut hasher = Sha256::new();
        hasher.update(&message[..64]);
        let midstate = hasher.state();

        let resumed = Sha256::resume(midstate, 512).chain_update(&message[64..]).finalize();
        assert_eq!(resumed, sha256_digest(&message));
        assert_eq!(hash_with(&message[64..], midstate, 512), sha256_digest(&message));
    }
}
