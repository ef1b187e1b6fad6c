//! End-to-end swap signing scenarios
//!
//! Builds a real `.swp` fixture (encrypted with the production KDF and
//! cipher), then walks the full load → decrypt → sign → verify flow.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use znn_swap_core::crypto::{derive_cipher_iv, derive_cipher_key, hash160, sha256};
use znn_swap_core::error::INVALID_PASSPHRASE_MESSAGE;
use znn_swap_core::{
    Address, PrivateKey, SignedMessage, SwapError, SwapFile, SwapMessageKind,
};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

const PASSPHRASE: &str = "correct horse battery staple";
const RECIPIENT: &str = "z1qxemdeddedxt0swapxxxxxxxxxxxxxxxxl4yww";
const WIF_VERSION: u8 = 0xd0;

struct Fixture {
    contents: String,
    private_key: PrivateKey,
}

fn build_fixture() -> Fixture {
    let private_key = PrivateKey::from_bytes(&[0x6fu8; 32]).unwrap();
    let wif = private_key.to_wif(WIF_VERSION);
    assert_eq!(wif.len(), 52);

    let key = derive_cipher_key(PASSPHRASE);
    let iv = derive_cipher_iv(PASSPHRASE);
    let cipher = Aes256CbcEnc::new_from_slices(&key, &iv).unwrap();
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(wif.as_bytes());

    let pub_key_b64 = BASE64.encode(private_key.public_key().to_encoded(false));
    let body = format!(
        "{{\"{pub_key_b64}\":[\"{}\",\"{}\"]}}",
        BASE64.encode(ciphertext),
        "5e".repeat(32)
    );
    let contents = format!("{body}{}", hex::encode(sha256(body.as_bytes())));

    Fixture {
        contents,
        private_key,
    }
}

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_sign_assets_end_to_end() {
    let fixture = build_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "wallet.swp", &fixture.contents);

    let file = SwapFile::read(&path).unwrap();
    assert_eq!(file.len(), 1);
    let entry = &file.entries()[0];

    let signature_b64 = entry.sign_assets(PASSPHRASE, RECIPIENT).unwrap();
    assert_eq!(signature_b64.len(), 88);

    let raw = BASE64.decode(&signature_b64).unwrap();
    assert_eq!(raw.len(), 65);
    assert!((27..=34).contains(&raw[0]));

    // The derived pubkey must verify the exact template body
    let derived = entry.derived_pub_key_b64();
    assert!(!derived.is_empty());
    let body = format!("ZNN swap retrieve assets {derived} {RECIPIENT}");
    assert!(SignedMessage::new(body)
        .verify_with_public_key(&fixture.private_key.public_key(), &signature_b64));
}

#[test]
fn test_wrong_passphrase_message() {
    let fixture = build_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "wallet.swp", &fixture.contents);

    let file = SwapFile::read(&path).unwrap();
    let err = file.entries()[0]
        .sign_assets("correct horse battery stapl3", RECIPIENT)
        .unwrap_err();

    assert!(matches!(err, SwapError::InvalidKey(_)));
    assert_eq!(err.to_string(), INVALID_PASSPHRASE_MESSAGE);
}

#[test]
fn test_flipped_trailer_character() {
    let fixture = build_fixture();
    let mut contents = fixture.contents;
    let flipped = if contents.ends_with('f') { '0' } else { 'f' };
    contents.pop();
    contents.push(flipped);

    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "wallet.swp", &contents);

    let err = SwapFile::read(&path).unwrap_err();
    assert!(matches!(err, SwapError::InvalidChecksum(_)));
    assert_eq!(err.to_string(), "Invalid swap wallet checksum");
}

#[test]
fn test_wrong_extension_names_swp() {
    let fixture = build_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "wallet.txt", &fixture.contents);

    let err = SwapFile::read(&path).unwrap_err();
    match err {
        SwapError::InvalidParameter(message) => assert!(message.contains("swp")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_wif_to_address_derivation() {
    let fixture = build_fixture();
    let wif = fixture.private_key.to_wif(WIF_VERSION);
    assert_eq!(wif.len(), 52);

    let parsed = PrivateKey::from_wif(&wif).unwrap();
    let public_key = parsed.public_key();
    let address = Address::from_public_key(&public_key);

    let encoded = address.to_base58();
    assert_eq!(encoded.len(), 34);

    let decoded = Address::from_base58(&encoded).unwrap();
    assert_eq!(decoded.version(), 0x50);
    assert_eq!(decoded.hash(), &hash160(&public_key.to_bytes())[..]);
}

#[test]
fn test_probe_populates_derived_pubkey() {
    let fixture = build_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "wallet.swp", &fixture.contents);

    let file = SwapFile::read(&path).unwrap();
    let entry = &file.entries()[0];
    assert_eq!(entry.derived_pub_key_b64(), "");

    entry.can_decrypt_with(PASSPHRASE).unwrap();

    let derived = entry.derived_pub_key_b64();
    let decoded = BASE64.decode(derived).unwrap();
    assert_eq!(decoded.len(), 65);
    assert_eq!(decoded[0], 0x04);
    assert_eq!(
        derived,
        BASE64.encode(fixture.private_key.public_key().to_encoded(false))
    );
}

#[test]
fn test_both_templates_and_container_rewrite() {
    let fixture = build_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "wallet.swp", &fixture.contents);

    let file = SwapFile::read(&path).unwrap();
    let entry = &file.entries()[0];

    let assets = entry
        .sign_message(SwapMessageKind::Assets, PASSPHRASE, RECIPIENT)
        .unwrap();
    let pillar = entry
        .sign_message(SwapMessageKind::LegacyPillar, PASSPHRASE, RECIPIENT)
        .unwrap();
    assert_ne!(assets, pillar);

    // Rewriting the container must reproduce a loadable file with the same
    // records; the derived pubkey never reaches the file
    let copy = dir.path().join("copy.swp");
    file.write(&copy).unwrap();
    let reread = SwapFile::read(&copy).unwrap();
    assert_eq!(reread.len(), 1);
    assert_eq!(
        reread.entries()[0].legacy_pub_key_b64(),
        entry.legacy_pub_key_b64()
    );
    assert_eq!(reread.entries()[0].derived_pub_key_b64(), "");
}
