//! secp256k1 private keys
//!
//! A scalar in `(0, n)` plus the compression flag its WIF form carried.
//! Keys never Display or Debug their scalar.

use k256::ecdsa::SigningKey;
use zeroize::Zeroize;

use crate::encoding::base58check;
use crate::error::{SwapError, SwapResult};
use crate::keys::PublicKey;

/// A secp256k1 signing key
#[derive(Clone)]
pub struct PrivateKey {
    key: SigningKey,
    compressed: bool,
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey([REDACTED], compressed: {})", self.compressed)
    }
}

impl PrivateKey {
    /// Build from a raw 32-byte big-endian scalar.
    ///
    /// Scalars of zero or at least the curve order are rejected. Keys built
    /// this way default to compressed serialization; WIF parsing overrides
    /// the flag from the payload shape.
    pub fn from_bytes(bytes: &[u8; 32]) -> SwapResult<Self> {
        Self::from_parts(bytes, true)
    }

    /// Build from a 64-character hex scalar
    pub fn from_hex(hex_scalar: &str) -> SwapResult<Self> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_scalar, &mut bytes)
            .map_err(|_| SwapError::invalid_key("private key hex must be 32 bytes"))?;
        let key = Self::from_parts(&bytes, true);
        bytes.zeroize();
        key
    }

    /// Parse a WIF string, discarding its version byte
    pub fn from_wif(wif: &str) -> SwapResult<Self> {
        Self::parse_wif(wif).map(|(key, _)| key)
    }

    /// Parse a WIF string, returning the key and its version byte.
    ///
    /// The payload after the version byte decides the flag: 32 bytes is an
    /// uncompressed key, 33 bytes ending in `0x01` a compressed one.
    pub fn parse_wif(wif: &str) -> SwapResult<(Self, u8)> {
        if wif.len() != 51 && wif.len() != 52 {
            return Err(SwapError::invalid_key(format!(
                "WIF must be 51 or 52 characters, got {}",
                wif.len()
            )));
        }
        if matches!(wif.chars().next(), Some('W') | Some('X')) && wif.len() != 52 {
            return Err(SwapError::invalid_key(
                "WIF starting with 'W' or 'X' must be 52 characters",
            ));
        }

        let mut decoded = base58check::decode_check(wif)?;
        if decoded.is_empty() {
            return Err(SwapError::invalid_key("WIF payload is empty"));
        }
        let version = decoded[0];

        let (scalar, compressed): (&[u8], bool) = match decoded.len() - 1 {
            32 => (&decoded[1..33], false),
            33 if decoded[33] == 0x01 => (&decoded[1..33], true),
            _ => {
                decoded.zeroize();
                return Err(SwapError::invalid_key("malformed WIF payload"));
            }
        };

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(scalar);
        let key = Self::from_parts(&bytes, compressed);
        bytes.zeroize();
        decoded.zeroize();

        Ok((key?, version))
    }

    fn from_parts(bytes: &[u8; 32], compressed: bool) -> SwapResult<Self> {
        let key = SigningKey::from_slice(bytes)
            .map_err(|_| SwapError::invalid_key("private key scalar out of range"))?;
        Ok(Self { key, compressed })
    }

    /// Serialize as WIF under the given version byte
    pub fn to_wif(&self, version: u8) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(version);
        payload.extend_from_slice(&self.key.to_bytes());
        if self.compressed {
            payload.push(0x01);
        }
        let wif = base58check::encode_check(&payload);
        payload.zeroize();
        wif
    }

    /// The derived public key `d·G`, inheriting the compression flag
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.key.verifying_key().to_owned(), self.compressed)
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.key
    }
}
