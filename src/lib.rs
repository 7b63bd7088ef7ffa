pub mod command;
pub mod error;
pub mod extension;
pub mod mac;
pub mod sha256;

pub use error::{Error, Result};
pub use extension::{forge, ExtensionAttack, Forgery};
pub use mac::{compute_mac, hmac_sha256, verify_mac, SecretPrefixMac};
pub use sha256::{sha256_digest, Digest, HashState, Sha256, SHA256_OUTPUT_SIZE};
