//! HMAC-SHA256 (RFC 2104).
//!
//! The outer hash covers only the key and the inner digest, so knowing one tag gives
//! no state from which to continue hashing.

use crate::sha256::{sha256_digest, Digest, Sha256, BLOCK_LEN};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Computes `H((key ⊕ opad) ‖ H((key ⊕ ipad) ‖ message))`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Digest {
    let mut ipad = [IPAD; BLOCK_LEN];
    let mut opad = [OPAD; BLOCK_LEN];

    let hashed_key;
    let key = if key.len() > BLOCK_LEN {
        hashed_key = sha256_digest(key);
        hashed_key.as_bytes().as_slice()
    } else {
        key
    };
    for (i, &b) in key.iter().enumerate() {
        ipad[i] ^= b;
        opad[i] ^= b;
    }

    let inner = Sha256::new().chain_update(ipad).chain_update(message).finalize();
    Sha256::new()
        .chain_update(opad)
        .chain_update(inner.as_bytes())
        .finalize()
}

/// Same comparison rules as [`super::prefix::verify_mac`].
pub fn verify_hmac(key: &[u8], message: &[u8], claimed: &str) -> bool {
    hmac_sha256(key, message).to_hex() == claimed
}
