//! Base58 and Base58Check codec
//!
//! Bitcoin-alphabet base58 with the classic 4-byte double-SHA-256 checksum.
//! Leading zero bytes survive a round trip (one `'1'` per zero byte).

use crate::crypto::double_sha256;
use crate::error::{SwapError, SwapResult};

/// Number of trailing checksum bytes in a checked payload
pub const CHECKSUM_LEN: usize = 4;

/// Encode bytes as base58
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a base58 string, naming the offending character on failure
pub fn decode(encoded: &str) -> SwapResult<Vec<u8>> {
    bs58::decode(encoded).into_vec().map_err(|err| match err {
        bs58::decode::Error::InvalidCharacter { character, index } => {
            SwapError::IllegalCharacter {
                character,
                position: index,
            }
        }
        bs58::decode::Error::NonAsciiCharacter { index } => SwapError::IllegalCharacter {
            character: encoded.chars().nth(index).unwrap_or('\u{fffd}'),
            position: index,
        },
        other => SwapError::invalid_parameter(format!("base58 decode failed: {other}")),
    })
}

/// Append the 4-byte double-SHA-256 checksum and encode
pub fn encode_check(payload: &[u8]) -> String {
    let checksum = double_sha256(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&data)
}

/// Decode, then verify and strip the trailing checksum
pub fn decode_check(encoded: &str) -> SwapResult<Vec<u8>> {
    let data = decode(encoded)?;
    if data.len() < CHECKSUM_LEN {
        return Err(SwapError::invalid_parameter(format!(
            "base58 payload too short for a checksum: {} bytes",
            data.len()
        )));
    }

    let (payload, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
    let expected = double_sha256(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(SwapError::invalid_checksum("invalid base58 checksum"));
    }

    Ok(payload.to_vec())
}
