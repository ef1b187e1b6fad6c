//! Swap module - swap-file container and per-entry attestation signing

mod entry;
mod file;
mod offload;

pub use entry::*;
pub use file::*;
