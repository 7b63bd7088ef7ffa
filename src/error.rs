use thiserror::Error;

/// Errors produced by hashing, MAC forgery and command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("digest must be {expected} hex characters, got {length}")]
    InvalidDigestLength { expected: usize, length: usize },

    #[error("digest has non-hex character {character:?} at position {index}")]
    InvalidDigestCharacter { character: char, index: usize },

    #[error("key length must be greater than zero, got {0}")]
    InvalidKeyLength(usize),

    #[error("{what} is missing (-{flag})")]
    MissingOption { flag: char, what: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
