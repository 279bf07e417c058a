//! Cryptographic primitives for voting key link transactions.
//!
//! - **SHA3-256** and **RIPEMD-160** for key hashing and address checksums
//! - Address derivation: network byte + key hash + checksum, base32 encoded

pub mod address;
pub mod hash;

pub use address::{address_network, decode_address, derive_address, validate_address};
pub use hash::{ripemd160, sha3_256, sha3_256_multi};
