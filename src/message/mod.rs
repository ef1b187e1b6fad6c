//! Signed-message engine
//!
//! Bitcoin-style signed messages: the body is framed with a length-prefixed
//! magic string, hashed twice with SHA-256, and signed with a recoverable
//! compact signature carried as Base64.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::constants::{MAX_MESSAGE_BODY_LEN, SIGNED_MESSAGE_MAGIC};
use crate::crypto::double_sha256;
use crate::error::{SwapError, SwapResult};
use crate::keys::{PrivateKey, PublicKey, Signature};

/// A message body bound to the swap magic prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    body: String,
}

impl SignedMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Double SHA-256 of `[len(magic)] || magic || [len(body)] || body`.
    ///
    /// Both length prefixes are single bytes, so bodies past 252 bytes are
    /// rejected rather than truncated.
    pub fn magic_hash(&self) -> SwapResult<[u8; 32]> {
        let magic = SIGNED_MESSAGE_MAGIC.as_bytes();
        let body = self.body.as_bytes();
        if body.len() > MAX_MESSAGE_BODY_LEN {
            return Err(SwapError::invalid_parameter(format!(
                "message body exceeds {MAX_MESSAGE_BODY_LEN} bytes: {}",
                body.len()
            )));
        }

        let mut frame = Vec::with_capacity(2 + magic.len() + body.len());
        frame.push(magic.len() as u8);
        frame.extend_from_slice(magic);
        frame.push(body.len() as u8);
        frame.extend_from_slice(body);

        Ok(double_sha256(&frame))
    }

    /// Sign the magic hash, returning the Base64 compact signature
    pub fn sign(&self, key: &PrivateKey) -> SwapResult<String> {
        let digest = self.magic_hash()?;
        let signature = Signature::sign(key, &digest)?;
        Ok(BASE64.encode(signature.to_compact()?))
    }

    /// Check a Base64 compact signature against an asserted public key.
    ///
    /// True only when the key recovered from the signature equals the
    /// asserted point and plain ECDSA verification passes as well. Any
    /// malformed input verifies false.
    pub fn verify_with_public_key(&self, key: &PublicKey, signature_b64: &str) -> bool {
        let Ok(digest) = self.magic_hash() else {
            return false;
        };
        let Ok(raw) = BASE64.decode(signature_b64) else {
            return false;
        };
        let Ok(signature) = Signature::from_compact(&raw) else {
            return false;
        };
        let Ok(recovered) = signature.recover_public_key(&digest) else {
            return false;
        };

        recovered == *key && signature.verify(key, &digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> PrivateKey {
        PrivateKey::from_bytes(&[0x33u8; 32]).unwrap()
    }

    #[test]
    fn test_magic_hash_framing() {
        let message = SignedMessage::new("hello");
        let magic = SIGNED_MESSAGE_MAGIC.as_bytes();

        let mut frame = vec![magic.len() as u8];
        frame.extend_from_slice(magic);
        frame.push(5);
        frame.extend_from_slice(b"hello");

        assert_eq!(message.magic_hash().unwrap(), double_sha256(&frame));
    }

    #[test]
    fn test_magic_prefix_length() {
        // The magic is 26 ASCII bytes; its length prefix must match
        assert_eq!(SIGNED_MESSAGE_MAGIC.len(), 26);
    }

    #[test]
    fn test_sign_and_verify() {
        let key = test_key();
        let message = SignedMessage::new("swap attestation body");
        let signature = message.sign(&key).unwrap();

        // 65 bytes of compact signature -> 88 Base64 characters
        assert_eq!(signature.len(), 88);
        assert!(message.verify_with_public_key(&key.public_key(), &signature));
    }

    #[test]
    fn test_verify_rejects_other_message() {
        let key = test_key();
        let signature = SignedMessage::new("message one").sign(&key).unwrap();
        assert!(!SignedMessage::new("message two")
            .verify_with_public_key(&key.public_key(), &signature));
    }

    #[test]
    fn test_verify_rejects_other_key() {
        let key = test_key();
        let other = PrivateKey::from_bytes(&[0x44u8; 32]).unwrap();
        let signature = SignedMessage::new("body").sign(&key).unwrap();
        assert!(!SignedMessage::new("body")
            .verify_with_public_key(&other.public_key(), &signature));
    }

    #[test]
    fn test_verify_rejects_bit_flips() {
        let key = test_key();
        let message = SignedMessage::new("tamper check");
        let signature = message.sign(&key).unwrap();
        let mut raw = BASE64.decode(&signature).unwrap();

        for index in [0usize, 1, 32, 33, 64] {
            raw[index] ^= 0x01;
            let tampered = BASE64.encode(&raw);
            assert!(!message.verify_with_public_key(&key.public_key(), &tampered));
            raw[index] ^= 0x01;
        }
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let key = test_key();
        let message = SignedMessage::new("body");
        assert!(!message.verify_with_public_key(&key.public_key(), "@@not-base64@@"));
        assert!(!message.verify_with_public_key(&key.public_key(), ""));
    }

    #[test]
    fn test_oversized_body_rejected() {
        let message = SignedMessage::new("x".repeat(253));
        assert!(matches!(
            message.magic_hash(),
            Err(SwapError::InvalidParameter(_))
        ));
        assert!(SignedMessage::new("x".repeat(252)).magic_hash().is_ok());
    }

    #[test]
    fn test_empty_body_allowed() {
        // The passphrase probe signs an empty-recipient template
        let key = test_key();
        let message = SignedMessage::new("");
        let signature = message.sign(&key).unwrap();
        assert!(message.verify_with_public_key(&key.public_key(), &signature));
    }
}
