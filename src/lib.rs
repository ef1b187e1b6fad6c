//! ZNN Swap Core Library
//!
//! Signing utility for the Zenon legacy swap: reads `.swp` wallet files of
//! encrypted secp256k1 keys, decrypts them with a user passphrase, and
//! produces attestation signatures that bind each legacy key to a recipient
//! address on the successor network.
//!
//! The container format, key-stretching parameters, and signature encoding
//! are bit-exact with the legacy tooling; nothing here is negotiable wire
//! format.

pub mod bridge;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod message;
pub mod swap;

pub use bridge::ExportBridge;
pub use error::{SwapError, SwapResult};
pub use keys::{Address, PrivateKey, PublicKey, Signature};
pub use message::SignedMessage;
pub use swap::{SwapEntry, SwapFile, SwapMessageKind};

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// File extension required of swap wallet files
    pub const SWAP_FILE_EXTENSION: &str = "swp";

    /// PBKDF2 salt, fixed by the legacy format
    pub const KDF_SALT: &[u8] = b"znn";

    /// PBKDF2 iteration count
    pub const KDF_ITERATIONS: u32 = 120_000;

    /// PBKDF2 output length (the AES-256 key)
    pub const KDF_OUTPUT_LEN: usize = 32;

    /// AES-CBC IV length, taken from the head of the reversed-passphrase
    /// stretch
    pub const CIPHER_IV_LEN: usize = 16;

    /// Bytes of decrypted plaintext interpreted as the WIF string
    pub const WIF_PLAINTEXT_LEN: usize = 52;

    /// Version byte of legacy-chain addresses
    pub const ADDRESS_VERSION: u8 = 0x50;

    /// Magic prefix of every signed swap message
    pub const SIGNED_MESSAGE_MAGIC: &str = "Zenon secp256k1 signature:";

    /// Template prefix of asset-retrieval attestations
    pub const ASSETS_TEMPLATE_PREFIX: &str = "ZNN swap retrieve assets ";

    /// Template prefix of legacy-pillar attestations
    pub const LEGACY_PILLAR_TEMPLATE_PREFIX: &str = "ZNN swap retrieve legacy pillar ";

    /// Base value of the compact-signature header byte
    pub const COMPACT_HEADER_BASE: u8 = 27;

    /// Largest message body a single-byte length prefix can carry
    pub const MAX_MESSAGE_BODY_LEN: usize = 252;
}
