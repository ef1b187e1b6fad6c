//! Encoding module - Base58 and Base58Check codecs

pub mod base58check;
