//! Passphrase key stretching
//!
//! The swap format fixes every PBKDF2 parameter: HMAC-SHA-256, the ASCII
//! salt `"znn"`, 120 000 iterations, 32 bytes out. Two derivations feed one
//! decryption: the cipher key stretches the passphrase as given, the IV
//! stretches the passphrase with its Unicode code points reversed and keeps
//! the first 16 bytes.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::constants::{CIPHER_IV_LEN, KDF_ITERATIONS, KDF_OUTPUT_LEN, KDF_SALT};

/// Stretch a passphrase into the 32-byte AES key
pub fn derive_cipher_key(passphrase: &str) -> [u8; KDF_OUTPUT_LEN] {
    let mut key = [0u8; KDF_OUTPUT_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut key);
    key
}

/// Stretch the code-point-reversed passphrase and truncate to the AES IV
pub fn derive_cipher_iv(passphrase: &str) -> [u8; CIPHER_IV_LEN] {
    let mut reversed: String = passphrase.chars().rev().collect();
    let mut seed = [0u8; KDF_OUTPUT_LEN];
    pbkdf2_hmac::<Sha256>(reversed.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut seed);
    reversed.zeroize();

    let mut iv = [0u8; CIPHER_IV_LEN];
    iv.copy_from_slice(&seed[..CIPHER_IV_LEN]);
    seed.zeroize();
    iv
}
