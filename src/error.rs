//! Crate-wide error taxonomy
//!
//! Every fallible operation surfaces one of these kinds unchanged to the
//! caller. The decrypt pipeline deliberately coalesces its internal failures
//! into a single `InvalidKey` so a wrong passphrase, bad padding, and a
//! garbled key are indistinguishable to the user.

use thiserror::Error;

/// Message used for every failure inside the decrypt-to-WIF pipeline.
pub const INVALID_PASSPHRASE_MESSAGE: &str = "Invalid decryption passphrase, please check again";

/// Swap utility errors
#[derive(Debug, Error)]
pub enum SwapError {
    /// Swap file missing or unreadable; export library not found.
    #[error("{0}")]
    InvalidPath(String),

    /// Swap-file trailer or Base58Check checksum mismatch.
    #[error("{0}")]
    InvalidChecksum(String),

    /// Base58 decode hit a character outside the alphabet.
    #[error("illegal base58 character {character:?} at position {position}")]
    IllegalCharacter { character: char, position: usize },

    /// Malformed input: wrong extension, empty buffer, bad length, bad JSON.
    #[error("{0}")]
    InvalidParameter(String),

    /// EC point off-curve, at infinity, or with an out-of-range coordinate.
    #[error("{0}")]
    InvalidPoint(String),

    /// Bad private key material, including any decrypt-pipeline failure.
    #[error("{0}")]
    InvalidKey(String),

    /// Signature encode/decode/recovery/verification failure.
    #[error("{0}")]
    Signature(String),
}

/// Result type for swap utility operations
pub type SwapResult<T> = std::result::Result<T, SwapError>;

impl SwapError {
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath(message.into())
    }

    pub fn invalid_checksum(message: impl Into<String>) -> Self {
        Self::InvalidChecksum(message.into())
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn invalid_point(message: impl Into<String>) -> Self {
        Self::InvalidPoint(message.into())
    }

    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey(message.into())
    }

    pub fn signature(message: impl Into<String>) -> Self {
        Self::Signature(message.into())
    }

    /// The one user-visible error for anything that goes wrong between
    /// ciphertext and parsed WIF. Callers must not leak which step failed.
    pub fn invalid_passphrase() -> Self {
        Self::InvalidKey(INVALID_PASSPHRASE_MESSAGE.to_string())
    }
}
