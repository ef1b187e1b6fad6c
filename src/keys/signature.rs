//! ECDSA signatures with public-key recovery
//!
//! Signing is deterministic (RFC 6979) and always low-S normalized. The
//! recovery index is found the classic way: try each `i` in `0..4`, recover
//! a candidate key, and keep the `i` whose candidate matches the signer.
//!
//! The compact wire form is 65 bytes: a header byte
//! `27 + 4*compressed + i`, then `r` and `s` as 32-byte big-endian values.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};

use crate::constants::COMPACT_HEADER_BASE;
use crate::error::{SwapError, SwapResult};
use crate::keys::{PrivateKey, PublicKey};

/// Byte length of a compact signature
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// An ECDSA `(r, s)` pair with optional recovery metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    inner: EcdsaSignature,
    recovery_id: Option<RecoveryId>,
    compressed: bool,
}

impl Signature {
    /// Sign a 32-byte digest.
    ///
    /// The result is low-S normalized and carries the recovery index that
    /// maps it back to the signer's public key.
    pub fn sign(key: &PrivateKey, digest: &[u8; 32]) -> SwapResult<Self> {
        let (mut inner, _) = key
            .signing_key()
            .sign_prehash_recoverable(digest)
            .map_err(|err| SwapError::signature(format!("signing failed: {err}")))?;

        // Normalization flips s, which also flips the recovery parity, so
        // the index is recomputed from scratch below.
        if let Some(normalized) = inner.normalize_s() {
            inner = normalized;
        }

        let mut signature = Self {
            inner,
            recovery_id: None,
            compressed: key.compressed(),
        };
        signature.calculate_recovery_id(&key.public_key(), digest)?;
        Ok(signature)
    }

    /// Find the recovery index against an expected public key.
    ///
    /// Tries each candidate `i`; the unique one whose recovered point equals
    /// `expected` is adopted. No match is a hard error.
    pub fn calculate_recovery_id(
        &mut self,
        expected: &PublicKey,
        digest: &[u8; 32],
    ) -> SwapResult<()> {
        for candidate in 0u8..4 {
            let Some(recovery_id) = RecoveryId::from_byte(candidate) else {
                continue;
            };
            let Ok(recovered) =
                VerifyingKey::recover_from_prehash(digest, &self.inner, recovery_id)
            else {
                continue;
            };
            if recovered == *expected.verifying_key() {
                self.recovery_id = Some(recovery_id);
                self.compressed = expected.compressed();
                return Ok(());
            }
        }
        Err(SwapError::signature("no recovery factor found"))
    }

    /// Recover the signing public key from this signature and its digest
    pub fn recover_public_key(&self, digest: &[u8; 32]) -> SwapResult<PublicKey> {
        let recovery_id = self
            .recovery_id
            .ok_or_else(|| SwapError::signature("signature has no recovery factor"))?;
        let key = VerifyingKey::recover_from_prehash(digest, &self.inner, recovery_id)
            .map_err(|err| SwapError::signature(format!("public key recovery failed: {err}")))?;
        Ok(PublicKey::from_verifying_key(key, self.compressed))
    }

    /// Verify against a public key; malformed state verifies false
    pub fn verify(&self, key: &PublicKey, digest: &[u8; 32]) -> bool {
        key.verifying_key().verify_prehash(digest, &self.inner).is_ok()
    }

    /// Encode as the 65-byte header/r/s compact form
    pub fn to_compact(&self) -> SwapResult<[u8; COMPACT_SIGNATURE_LEN]> {
        let recovery_id = self
            .recovery_id
            .ok_or_else(|| SwapError::signature("signature has no recovery factor"))?;

        let mut compact = [0u8; COMPACT_SIGNATURE_LEN];
        compact[0] =
            COMPACT_HEADER_BASE + if self.compressed { 4 } else { 0 } + recovery_id.to_byte();
        compact[1..].copy_from_slice(&self.inner.to_bytes());
        Ok(compact)
    }

    /// Decode the 65-byte compact form
    pub fn from_compact(bytes: &[u8]) -> SwapResult<Self> {
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(SwapError::invalid_parameter(format!(
                "compact signature must be {COMPACT_SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let header = bytes[0];
        if !(COMPACT_HEADER_BASE..COMPACT_HEADER_BASE + 8).contains(&header) {
            return Err(SwapError::signature(format!(
                "invalid compact signature header byte {header}"
            )));
        }
        let header = header - COMPACT_HEADER_BASE;
        let compressed = header & 0x04 != 0;
        let recovery_id = RecoveryId::from_byte(header & 0x03)
            .ok_or_else(|| SwapError::signature("invalid recovery factor"))?;

        let inner = EcdsaSignature::from_slice(&bytes[1..])
            .map_err(|err| SwapError::signature(format!("malformed signature scalars: {err}")))?;

        Ok(Self {
            inner,
            recovery_id: Some(recovery_id),
            compressed,
        })
    }

    /// ASN.1 DER encoding of `(r, s)`
    pub fn to_der(&self) -> Vec<u8> {
        self.inner.to_der().as_bytes().to_vec()
    }

    /// Parse a DER `(r, s)` pair; the result carries no recovery metadata
    pub fn from_der(bytes: &[u8]) -> SwapResult<Self> {
        let inner = EcdsaSignature::from_der(bytes)
            .map_err(|err| SwapError::signature(format!("malformed DER signature: {err}")))?;
        Ok(Self {
            inner,
            recovery_id: None,
            compressed: false,
        })
    }

    /// Big-endian `r`
    pub fn r_bytes(&self) -> [u8; 32] {
        let bytes = self.inner.to_bytes();
        let mut r = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        r
    }

    /// Big-endian `s`
    pub fn s_bytes(&self) -> [u8; 32] {
        let bytes = self.inner.to_bytes();
        let mut s = [0u8; 32];
        s.copy_from_slice(&bytes[32..]);
        s
    }

    /// True once the signature is in canonical low-S form
    pub fn is_low_s(&self) -> bool {
        self.inner.normalize_s().is_none()
    }

    pub fn recovery_index(&self) -> Option<u8> {
        self.recovery_id.map(|id| id.to_byte())
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }
}
