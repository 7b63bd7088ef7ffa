//! Message padding (FIPS 180-4, section 5.1.1).
//!
//! A message is followed by a single `1` bit (the `0x80` byte), as many zero bytes as
//! needed to reach 448 bits modulo 512, and the message length in bits as a 64-bit
//! big-endian integer. The result is always a whole number of 64-byte blocks.
//!
//! Two knobs exist for resuming a hash from a leaked state:
//!
//! - `skip` pretends that many bytes precede the message in its first block, which only
//!   moves where the zero run ends.
//! - `extra_bits` is added to the length field, so the field covers data hashed before
//!   the message.

use super::BLOCK_LEN;

/// Bytes reserved for the length field at the end of the last block.
const LENGTH_FIELD_LEN: usize = 8;

/// Offset inside a block where the length field starts.
const LENGTH_FIELD_OFFSET: usize = BLOCK_LEN - LENGTH_FIELD_LEN;

/// Pads `message` as a standalone SHA-256 input.
pub fn pad(message: &[u8]) -> Vec<u8> {
    pad_offset(message, 0, 0)
}

/// Pads `message` as if `skip` unseen bytes preceded it and `extra_bits` bits had
/// already been hashed.
///
/// `extra_bits` is rounded up to a whole number of bytes before it is added to the
/// message length.
pub fn pad_offset(message: &[u8], skip: usize, extra_bits: u64) -> Vec<u8> {
    let glue = glue_padding(message.len(), skip, extra_bits);
    let mut padded = Vec::with_capacity(message.len() + glue.len());
    padded.extend_from_slice(message);
    padded.extend_from_slice(&glue);
    padded
}

/// Returns only the bytes [`pad_offset`] would append to a message of `message_len`
/// bytes: the `0x80` marker, the zero run and the 8-byte length field.
pub fn glue_padding(message_len: usize, skip: usize, extra_bits: u64) -> Vec<u8> {
    let used = (message_len % BLOCK_LEN + skip % BLOCK_LEN + 1) % BLOCK_LEN;
    let zeros = if used <= LENGTH_FIELD_OFFSET {
        LENGTH_FIELD_OFFSET - used
    } else {
        BLOCK_LEN - used + LENGTH_FIELD_OFFSET
    };

    let bit_len = (message_len as u64)
        .wrapping_mul(8)
        .wrapping_add(round_up_to_byte(extra_bits));

    let mut glue = Vec::with_capacity(1 + zeros + LENGTH_FIELD_LEN);
    glue.push(0x80);
    glue.resize(1 + zeros, 0x00);
    glue.extend_from_slice(&bit_len.to_be_bytes());
    glue
}

fn round_up_to_byte(bits: u64) -> u64 {
    bits.div_ceil(8).wrapping_mul(8)
}
