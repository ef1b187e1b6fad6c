//! SHA-256 hashing utilities
//!
//! The swap format leans on three Bitcoin-era constructions: plain SHA-256
//! for the file trailer, double SHA-256 for checksums and message digests,
//! and RIPEMD-160 over SHA-256 ("hash160") for addresses.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 of arbitrary bytes
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of the SHA-256 of the input
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}
