//! Key module - secp256k1 private/public keys, ECDSA signatures, addresses

mod address;
mod private;
mod public;
mod signature;

pub use address::*;
pub use private::*;
pub use public::*;
pub use signature::*;
