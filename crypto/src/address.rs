//! Address derivation from public keys.
//!
//! Raw address (24 bytes): `network_byte || ripemd160(sha3_256(key)) || checksum`
//!
//! Checksum: first 3 bytes of SHA3-256 over the leading 21 bytes.
//! Base32 alphabet: RFC 4648 upper-case, no padding, so 24 bytes encode to
//! 39 characters.
//!
//! The key may be of any length: account keys are 32 bytes, voting keys 48.

use votelink_types::{Address, NetworkType};

use crate::{ripemd160, sha3_256, sha3_256_multi};

/// Base32 alphabet (RFC 4648).
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Length of the decoded address.
const RAW_LEN: usize = 24;
/// Network byte + key hash, the part covered by the checksum.
const CHECKSUMMED_LEN: usize = 21;
const CHECKSUM_LEN: usize = 3;

/// Encode a byte slice as base32.
fn encode_base32(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let num_chars = total_bits.div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    // Remaining bits (padded with zeros on the right).
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

/// Decode a base32 string into a fixed-size byte array. Returns `None` on
/// invalid characters, wrong length or non-zero padding bits.
fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = BASE32_DECODE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    if pos < N {
        return None;
    }
    if buffer & ((1u64 << bits_in_buffer) - 1) != 0 {
        return None;
    }
    Some(result)
}

/// Derive the address of `public_key` on `network`.
///
/// Process:
/// 1. Key hash = RIPEMD-160(SHA3-256(public_key))
/// 2. Prepend the network byte
/// 3. Append the first 3 bytes of SHA3-256 over the 21 bytes so far
/// 4. Base32-encode the 24 bytes
pub fn derive_address(public_key: &[u8], network: NetworkType) -> Address {
    let key_hash = ripemd160(&sha3_256(public_key));

    let checksum = sha3_256_multi(&[&[network.as_u8()][..], &key_hash[..]]);

    let mut raw = [0u8; RAW_LEN];
    raw[0] = network.as_u8();
    raw[1..CHECKSUMMED_LEN].copy_from_slice(&key_hash);
    raw[CHECKSUMMED_LEN..].copy_from_slice(&checksum[..CHECKSUM_LEN]);

    Address::new(encode_base32(&raw))
}

/// Decode an address into its 24 raw bytes.
///
/// Accepts plain or dashed form in either case. Returns `None` if the
/// address is malformed or has an invalid checksum.
pub fn decode_address(address: &str) -> Option<[u8; RAW_LEN]> {
    let canonical = Address::new(address);
    if canonical.as_str().len() != Address::ENCODED_LEN {
        return None;
    }

    let raw: [u8; RAW_LEN] = decode_base32_fixed(canonical.as_str())?;
    let expected_checksum = &sha3_256(&raw[..CHECKSUMMED_LEN])[..CHECKSUM_LEN];
    if raw[CHECKSUMMED_LEN..] != *expected_checksum {
        return None;
    }

    Some(raw)
}

/// The network an address belongs to, if it is valid and the network known.
pub fn address_network(address: &str) -> Option<NetworkType> {
    let raw = decode_address(address)?;
    NetworkType::try_from(raw[0]).ok()
}

/// Validate that an address string is well-formed, carries a correct
/// checksum and names a known network.
pub fn validate_address(address: &str) -> bool {
    address_network(address).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_key(seed: u8) -> [u8; 32] {
        sha3_256(&[seed])
    }

    #[test]
    fn derive_and_validate() {
        let addr = derive_address(&account_key(1), NetworkType::TestNet);
        assert_eq!(addr.as_str().len(), Address::ENCODED_LEN);
        assert!(addr.as_str().starts_with('T'));
        assert!(validate_address(addr.as_str()));
    }

    #[test]
    fn raw_layout_matches_ledger_scheme() {
        let key = account_key(9);
        let addr = derive_address(&key, NetworkType::MainNet);
        let raw = decode_address(addr.as_str()).unwrap();

        let mut expected = vec![0x68];
        expected.extend_from_slice(&ripemd160(&sha3_256(&key)));
        let checksum = sha3_256(&expected);
        expected.extend_from_slice(&checksum[..3]);
        assert_eq!(raw.to_vec(), expected);
    }

    #[test]
    fn network_prefix_letters() {
        let key = account_key(2);
        assert!(derive_address(&key, NetworkType::MainNet)
            .as_str()
            .starts_with('N'));
        assert!(derive_address(&key, NetworkType::Private)
            .as_str()
            .starts_with('P'));
        assert!(derive_address(&key, NetworkType::Mijin)
            .as_str()
            .starts_with('M'));
    }

    #[test]
    fn derive_is_deterministic() {
        let a1 = derive_address(&account_key(7), NetworkType::MainNet);
        let a2 = derive_address(&account_key(7), NetworkType::MainNet);
        assert_eq!(a1, a2);
    }

    #[test]
    fn same_key_differs_across_networks() {
        let key = account_key(3);
        assert_ne!(
            derive_address(&key, NetworkType::MainNet),
            derive_address(&key, NetworkType::TestNet)
        );
    }

    #[test]
    fn voting_keys_derive_addresses() {
        let voting_key = [0x5A; 48];
        let addr = derive_address(&voting_key, NetworkType::TestNet);
        assert_eq!(address_network(addr.as_str()), Some(NetworkType::TestNet));
        assert_ne!(addr, derive_address(&voting_key[..32], NetworkType::TestNet));
    }

    #[test]
    fn pretty_form_validates() {
        let addr = derive_address(&account_key(4), NetworkType::TestNet);
        assert!(validate_address(&addr.pretty().to_lowercase()));
    }

    #[test]
    fn invalid_checksum_rejected() {
        let addr = derive_address(&account_key(5), NetworkType::TestNet);
        let mut bad = addr.as_str().to_string();
        let last = bad.pop().unwrap();
        let replacement = if last == 'A' { 'Q' } else { 'A' };
        bad.push(replacement);
        assert!(!validate_address(&bad));
    }

    #[test]
    fn non_zero_padding_bits_rejected() {
        let addr = derive_address(&[0x44; 48], NetworkType::TestNet);
        let mut alt = addr.as_str().to_string();
        let last = alt.pop().unwrap();
        // The final character carries 2 data bits and 3 zero padding bits.
        let value = BASE32_DECODE[last as usize];
        assert_eq!(value & 0x07, 0);
        alt.push(BASE32_ALPHABET[(value | 0x01) as usize] as char);

        assert!(!validate_address(&alt));
        assert!(decode_address(&alt).is_none());
        assert!(validate_address(addr.as_str()));
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(!validate_address("TAAAA"));
        assert!(!validate_address(""));
    }

    #[test]
    fn base32_encode_decode_roundtrip() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF, 0x42];
        let encoded = encode_base32(&data);
        let decoded: [u8; 5] = decode_base32_fixed(&encoded).unwrap();
        assert_eq!(decoded, data);
    }
}
