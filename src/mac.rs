//! Message authentication codes built on [`crate::sha256`].
//!
//! [`prefix`] is the naive `SHA-256(key ‖ message)` construction, which the
//! [`crate::extension`] module breaks. [`hmac`] is the standard fix.

pub mod hmac;
pub mod prefix;

pub use hmac::{hmac_sha256, verify_hmac};
pub use prefix::{compute_mac, verify_mac, SecretPrefixMac};
