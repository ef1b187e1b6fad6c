//! Swap-record decryption
//!
//! Records hold an AES-256-CBC ciphertext (PKCS#7 padded) of a WIF string.
//! Key and IV both come from the passphrase via [`crate::crypto::kdf`].
//!
//! Security contract: every failure between ciphertext and parsed WIF
//! surfaces as the same `InvalidKey` error so callers cannot distinguish a
//! wrong passphrase from bad padding or a corrupted record.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use zeroize::Zeroize;

use crate::constants::WIF_PLAINTEXT_LEN;
use crate::crypto::kdf;
use crate::error::{SwapError, SwapResult};

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Decrypt a Base64 record ciphertext into its WIF string.
///
/// The plaintext is interpreted as UTF-8 and the first 52 bytes are taken as
/// the WIF; anything after that is ignored.
pub fn decrypt_wif(ciphertext_b64: &str, passphrase: &str) -> SwapResult<String> {
    let ciphertext = BASE64
        .decode(ciphertext_b64)
        .map_err(|_| SwapError::invalid_passphrase())?;

    let mut key = kdf::derive_cipher_key(passphrase);
    let mut iv = kdf::derive_cipher_iv(passphrase);
    let cipher = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|_| SwapError::invalid_passphrase())?;
    key.zeroize();
    iv.zeroize();

    let mut plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| SwapError::invalid_passphrase())?;

    if plaintext.len() < WIF_PLAINTEXT_LEN {
        plaintext.zeroize();
        return Err(SwapError::invalid_passphrase());
    }

    let wif = match std::str::from_utf8(&plaintext[..WIF_PLAINTEXT_LEN]) {
        Ok(text) => text.to_string(),
        Err(_) => {
            plaintext.zeroize();
            return Err(SwapError::invalid_passphrase());
        }
    };
    plaintext.zeroize();

    Ok(wif)
}
