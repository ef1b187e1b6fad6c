//! secp256k1 public keys
//!
//! An EC point plus a `compressed` flag that only governs serialization.
//! Point equality deliberately ignores the flag.

use k256::ecdsa::VerifyingKey;

use crate::error::{SwapError, SwapResult};

/// A point on secp256k1 with a preferred serialization
#[derive(Debug, Clone)]
pub struct PublicKey {
    key: VerifyingKey,
    compressed: bool,
}

impl PublicKey {
    pub(crate) fn from_verifying_key(key: VerifyingKey, compressed: bool) -> Self {
        Self { key, compressed }
    }

    /// Parse a SEC1-encoded point.
    ///
    /// Accepts `04 || X || Y` (65 bytes, uncompressed) and `02`/`03 || X`
    /// (33 bytes, compressed). The hybrid prefixes `06`/`07` are tolerated
    /// only when `strict` is false and are read as uncompressed points.
    pub fn from_der(bytes: &[u8], strict: bool) -> SwapResult<Self> {
        let Some(&prefix) = bytes.first() else {
            return Err(SwapError::invalid_parameter("empty public key buffer"));
        };

        match prefix {
            0x04 if bytes.len() == 65 => Self::parse_point(bytes, false),
            0x02 | 0x03 if bytes.len() == 33 => Self::parse_point(bytes, true),
            0x06 | 0x07 if !strict && bytes.len() == 65 => {
                let mut uncompressed = bytes.to_vec();
                uncompressed[0] = 0x04;
                Self::parse_point(&uncompressed, false)
            }
            _ => Err(SwapError::invalid_parameter(format!(
                "unsupported public key encoding: prefix 0x{prefix:02x}, {} bytes",
                bytes.len()
            ))),
        }
    }

    /// Build a point from raw affine coordinates, rejecting off-curve input
    pub fn from_coordinates(x: &[u8; 32], y: &[u8; 32]) -> SwapResult<Self> {
        let mut encoded = Vec::with_capacity(65);
        encoded.push(0x04);
        encoded.extend_from_slice(x);
        encoded.extend_from_slice(y);
        Self::parse_point(&encoded, true)
    }

    fn parse_point(sec1: &[u8], compressed: bool) -> SwapResult<Self> {
        let key = VerifyingKey::from_sec1_bytes(sec1)
            .map_err(|_| SwapError::invalid_point("point is not on the secp256k1 curve"))?;
        Ok(Self { key, compressed })
    }

    /// Serialize with an explicit compression choice (33 or 65 bytes)
    pub fn to_encoded(&self, compressed: bool) -> Vec<u8> {
        self.key.to_encoded_point(compressed).as_bytes().to_vec()
    }

    /// Serialize according to this key's own `compressed` flag
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_encoded(self.compressed)
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn set_compressed(&mut self, compressed: bool) {
        self.compressed = compressed;
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.key
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PublicKey {}
