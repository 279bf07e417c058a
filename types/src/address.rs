//! Account address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A base32-encoded account address.
///
/// Stored in canonical form: upper-case, without the dash separators used by
/// the "pretty" representation. Derive one from a public key with
/// `votelink_crypto::derive_address`; check one with
/// `votelink_crypto::validate_address`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Number of characters in a canonical address.
    pub const ENCODED_LEN: usize = 39;

    /// Wrap a raw address string, normalising case and stripping dashes.
    ///
    /// No checksum validation is performed here.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let canonical = raw
            .as_ref()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The dashed, six-character-grouped form shown to users.
    pub fn pretty(&self) -> String {
        self.0
            .as_bytes()
            .chunks(6)
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_and_plain_forms_compare_equal() {
        let plain = Address::new("TBZ2OB6DKT3VXN3DOQF6AU5MWCAJ3ZIPH6HXZHY");
        let pretty = Address::new("tbz2ob-6dkt3v-xn3doq-f6au5m-wcaj3z-iph6hx-zhy");
        assert_eq!(plain, pretty);
        assert_eq!(plain.pretty(), "TBZ2OB-6DKT3V-XN3DOQ-F6AU5M-WCAJ3Z-IPH6HX-ZHY");
    }
}
