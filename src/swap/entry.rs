//! Swap-file entries and attestation signing
//!
//! One entry per legacy key. Signing decrypts the record with the
//! passphrase, derives the public key from the recovered WIF, builds the
//! attestation template, and returns the Base64 compact signature over the
//! message's magic hash.

use std::sync::{Arc, OnceLock};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use zeroize::Zeroize;

use crate::constants::{ASSETS_TEMPLATE_PREFIX, LEGACY_PILLAR_TEMPLATE_PREFIX};
use crate::crypto::decrypt_wif;
use crate::error::{SwapError, SwapResult};
use crate::keys::{Address, PrivateKey};
use crate::message::SignedMessage;

/// Which attestation template a signature binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapMessageKind {
    /// Redirect legacy pillar rights
    LegacyPillar,
    /// Redirect legacy assets
    Assets,
}

impl SwapMessageKind {
    /// The literal template prefix, trailing space included
    pub fn template_prefix(&self) -> &'static str {
        match self {
            Self::LegacyPillar => LEGACY_PILLAR_TEMPLATE_PREFIX,
            Self::Assets => ASSETS_TEMPLATE_PREFIX,
        }
    }
}

/// One encrypted key record from a swap file
#[derive(Debug, Clone)]
pub struct SwapEntry {
    legacy_pub_key_b64: String,
    legacy_address: Address,
    key_id_hash_hex: String,
    encrypted_priv_key_b64: String,
    // Shared so clones handed to workers populate the same cache; every
    // successful derivation yields the same bytes, so first-write-wins is
    // indistinguishable from last-write-wins.
    derived_pub_key_b64: Arc<OnceLock<String>>,
}

impl SwapEntry {
    pub(crate) fn new(
        legacy_pub_key_b64: String,
        legacy_address: Address,
        key_id_hash_hex: String,
        encrypted_priv_key_b64: String,
    ) -> Self {
        Self {
            legacy_pub_key_b64,
            legacy_address,
            key_id_hash_hex,
            encrypted_priv_key_b64,
            derived_pub_key_b64: Arc::new(OnceLock::new()),
        }
    }

    /// Base64 of the legacy public key this record was filed under
    pub fn legacy_pub_key_b64(&self) -> &str {
        &self.legacy_pub_key_b64
    }

    /// Address derived from the legacy public key at load time
    pub fn legacy_address(&self) -> &Address {
        &self.legacy_address
    }

    /// Opaque key-id hash carried through from the file
    pub fn key_id_hash_hex(&self) -> &str {
        &self.key_id_hash_hex
    }

    /// Base64 AES ciphertext of the record's WIF
    pub fn encrypted_priv_key_b64(&self) -> &str {
        &self.encrypted_priv_key_b64
    }

    /// Base64 of the decrypt-derived public key.
    ///
    /// Empty until the first successful signing call on this entry.
    pub fn derived_pub_key_b64(&self) -> &str {
        self.derived_pub_key_b64
            .get()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Sign the asset-retrieval attestation for a recipient address
    pub fn sign_assets(&self, passphrase: &str, recipient: &str) -> SwapResult<String> {
        self.sign_message(SwapMessageKind::Assets, passphrase, recipient)
    }

    /// Sign the legacy-pillar attestation for a recipient address
    pub fn sign_legacy_pillar(&self, passphrase: &str, recipient: &str) -> SwapResult<String> {
        self.sign_message(SwapMessageKind::LegacyPillar, passphrase, recipient)
    }

    /// Probe whether a passphrase decrypts this record.
    ///
    /// Runs the full decrypt-and-sign pipeline against an empty recipient
    /// and discards the signature; a clean return is the only contract.
    pub fn can_decrypt_with(&self, passphrase: &str) -> SwapResult<()> {
        self.sign_message(SwapMessageKind::LegacyPillar, passphrase, "")
            .map(|_| ())
    }

    /// Sign one of the attestation templates.
    ///
    /// The public key placed in the message body is always the Base64 of
    /// the uncompressed 65-byte encoding of the just-decrypted key; it is
    /// recomputed per call and cached on the entry after success.
    pub fn sign_message(
        &self,
        kind: SwapMessageKind,
        passphrase: &str,
        recipient: &str,
    ) -> SwapResult<String> {
        let private_key = self.decrypt_private_key(passphrase)?;
        let derived_pub_key = BASE64.encode(private_key.public_key().to_encoded(false));

        let body = format!("{}{derived_pub_key} {recipient}", kind.template_prefix());
        let signature = SignedMessage::new(body).sign(&private_key)?;

        let _ = self.derived_pub_key_b64.set(derived_pub_key);
        Ok(signature)
    }

    /// Decrypt this record into its private key.
    ///
    /// Per the decrypt-pipeline contract, a WIF that fails to parse is
    /// reported exactly like a wrong passphrase.
    fn decrypt_private_key(&self, passphrase: &str) -> SwapResult<PrivateKey> {
        let mut wif = decrypt_wif(&self.encrypted_priv_key_b64, passphrase)?;
        let key = PrivateKey::from_wif(&wif).map_err(|_| SwapError::invalid_passphrase());
        wif.zeroize();
        key
    }
}
