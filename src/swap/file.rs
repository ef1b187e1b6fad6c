//! Swap-file container
//!
//! A `.swp` file is UTF-8 text: a JSON object mapping Base64 legacy public
//! keys to `[ciphertextB64, keyIdHashHex]` pairs, followed by exactly 64 hex
//! characters holding the lowercase SHA-256 of the JSON body. Surrounding
//! whitespace is stripped before the split.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::SWAP_FILE_EXTENSION;
use crate::crypto::sha256;
use crate::error::{SwapError, SwapResult};
use crate::keys::{Address, PublicKey};
use crate::swap::SwapEntry;

/// Hex characters in the file trailer
const TRAILER_LEN: usize = 64;

/// One record value as it sits in the JSON body
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRecord(String, String);

/// A parsed, checksum-verified swap file
#[derive(Debug, Clone)]
pub struct SwapFile {
    path: Option<PathBuf>,
    entries: Vec<SwapEntry>,
}

impl SwapFile {
    /// Read and verify a swap file from disk
    pub fn read(path: impl AsRef<Path>) -> SwapResult<Self> {
        let path = path.as_ref();
        Self::check_extension(path)?;

        let raw = fs::read_to_string(path).map_err(|err| {
            SwapError::invalid_path(format!(
                "cannot read swap wallet file {}: {err}",
                path.display()
            ))
        })?;

        let entries = Self::parse(&raw)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    /// Parse swap-file text: split off the trailer, verify, decode records
    pub fn parse(raw: &str) -> SwapResult<Vec<SwapEntry>> {
        let trimmed = raw.trim();
        if trimmed.len() <= TRAILER_LEN {
            return Err(SwapError::invalid_parameter(
                "swap wallet file is truncated",
            ));
        }

        let split = trimmed.len() - TRAILER_LEN;
        if !trimmed.is_char_boundary(split) {
            return Err(SwapError::invalid_parameter(
                "malformed swap wallet trailer",
            ));
        }
        let (body, expected_digest) = trimmed.split_at(split);

        let computed_digest = hex::encode(sha256(body.as_bytes()));
        if computed_digest != expected_digest {
            warn!(expected = expected_digest, "swap wallet checksum mismatch");
            return Err(SwapError::invalid_checksum("Invalid swap wallet checksum"));
        }

        let records: BTreeMap<String, RawRecord> = serde_json::from_str(body)
            .map_err(|err| {
                SwapError::invalid_parameter(format!("malformed swap wallet body: {err}"))
            })?;

        let mut entries = Vec::with_capacity(records.len());
        for (pub_key_b64, RawRecord(ciphertext_b64, key_id_hash_hex)) in records {
            let der = BASE64.decode(&pub_key_b64).map_err(|err| {
                SwapError::invalid_parameter(format!("record public key is not Base64: {err}"))
            })?;
            let public_key = PublicKey::from_der(&der, true)?;
            let legacy_address =
                Address::from_pubkey_bytes(&public_key.to_encoded(true));

            entries.push(SwapEntry::new(
                pub_key_b64,
                legacy_address,
                key_id_hash_hex,
                ciphertext_b64,
            ));
        }

        debug!(entries = entries.len(), "loaded swap wallet");
        Ok(entries)
    }

    /// Re-emit the container: JSON body plus its lowercase SHA-256 trailer.
    ///
    /// Only the load-time fields are written; the decrypt-derived public key
    /// is never part of the file.
    pub fn serialize(&self) -> SwapResult<String> {
        let mut records = BTreeMap::new();
        for entry in &self.entries {
            records.insert(
                entry.legacy_pub_key_b64().to_string(),
                RawRecord(
                    entry.encrypted_priv_key_b64().to_string(),
                    entry.key_id_hash_hex().to_string(),
                ),
            );
        }

        let body = serde_json::to_string(&records).map_err(|err| {
            SwapError::invalid_parameter(format!("cannot serialize swap wallet body: {err}"))
        })?;
        let digest = hex::encode(sha256(body.as_bytes()));
        Ok(format!("{body}{digest}"))
    }

    /// Write the container to a `.swp` path
    pub fn write(&self, path: impl AsRef<Path>) -> SwapResult<()> {
        let path = path.as_ref();
        Self::check_extension(path)?;
        let contents = self.serialize()?;
        fs::write(path, contents).map_err(|err| {
            SwapError::invalid_path(format!(
                "cannot write swap wallet file {}: {err}",
                path.display()
            ))
        })
    }

    /// The path this file was read from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[SwapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its legacy address string
    pub fn find_by_address(&self, address: &str) -> Option<&SwapEntry> {
        self.entries
            .iter()
            .find(|entry| entry.legacy_address().to_base58() == address)
    }

    fn check_extension(path: &Path) -> SwapResult<()> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(SWAP_FILE_EXTENSION) => Ok(()),
            _ => Err(SwapError::invalid_parameter(format!(
                "swap wallet file must use the .{SWAP_FILE_EXTENSION} extension: {}",
                path.display()
            ))),
        }
    }
}
