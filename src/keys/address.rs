//! Legacy-chain address derivation
//!
//! An address is the version byte `0x50` followed by the 20-byte hash160 of
//! the serialized public key, Base58Check-encoded.

use std::fmt;

use crate::constants::ADDRESS_VERSION;
use crate::crypto::hash160;
use crate::encoding::base58check;
use crate::error::{SwapError, SwapResult};
use crate::keys::PublicKey;

/// A versioned pubkey-hash address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    version: u8,
    hash: Vec<u8>,
}

impl Address {
    /// Derive from a public key, honoring its compression flag
    pub fn from_public_key(key: &PublicKey) -> Self {
        Self::from_pubkey_bytes(&key.to_bytes())
    }

    /// Derive from already-serialized public key bytes
    pub fn from_pubkey_bytes(pubkey: &[u8]) -> Self {
        Self {
            version: ADDRESS_VERSION,
            hash: hash160(pubkey).to_vec(),
        }
    }

    /// Parse a Base58Check address string.
    ///
    /// String lengths other than 25 or 34 characters are rejected up front;
    /// both survive for compatibility with pre-existing inputs.
    pub fn from_base58(encoded: &str) -> SwapResult<Self> {
        if encoded.len() != 25 && encoded.len() != 34 {
            return Err(SwapError::invalid_parameter(format!(
                "address must be 25 or 34 characters, got {}",
                encoded.len()
            )));
        }

        let payload = base58check::decode_check(encoded)?;
        let Some((&version, hash)) = payload.split_first() else {
            return Err(SwapError::invalid_parameter("address payload is empty"));
        };

        Ok(Self {
            version,
            hash: hash.to_vec(),
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// The Base58Check string form
    pub fn to_base58(&self) -> String {
        let mut payload = Vec::with_capacity(1 + self.hash.len());
        payload.push(self.version);
        payload.extend_from_slice(&self.hash);
        base58check::encode_check(&payload)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}
