//! Fixed-length key and signature types.
//!
//! All three are plain byte arrays on the wire and upper-case hex strings in
//! text form (JSON, CLI, logs).

use crate::TypesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;
            pub const ZERO: Self = Self([0u8; $len]);

            pub fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Copy from a slice, failing unless it is exactly `LEN` bytes.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
                let arr: [u8; $len] =
                    bytes
                        .try_into()
                        .map_err(|_| TypesError::InvalidLength {
                            kind: $kind,
                            expected: $len,
                            actual: bytes.len(),
                        })?;
                Ok(Self(arr))
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Whether every byte is zero (the "absent" sentinel on the wire).
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            pub fn to_hex(&self) -> String {
                hex::encode_upper(self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = hex::decode(s).map_err(|e| TypesError::InvalidHex {
                    kind: $kind,
                    reason: e.to_string(),
                })?;
                Self::from_slice(&bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({}\u{2026})",
                    stringify!($name),
                    hex::encode_upper(&self.0[..4])
                )
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// A 32-byte account public key.
    PublicKey,
    32,
    "public key"
);

fixed_bytes!(
    /// A 48-byte finalization voting public key.
    VotingKey,
    48,
    "voting key"
);

fixed_bytes!(
    /// A 64-byte transaction signature.
    Signature,
    64,
    "signature"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let key = VotingKey::new([0xAB; 48]);
        let text = key.to_hex();
        assert_eq!(text.len(), 96);
        assert_eq!(text.parse::<VotingKey>().unwrap(), key);
    }

    #[test]
    fn lower_case_hex_accepted() {
        let key: PublicKey = "ab".repeat(32).parse().unwrap();
        assert_eq!(key, PublicKey::new([0xAB; 32]));
    }

    #[test]
    fn wrong_length_rejected() {
        let err = "00".repeat(32).parse::<VotingKey>().unwrap_err();
        assert_eq!(
            err,
            TypesError::InvalidLength {
                kind: "voting key",
                expected: 48,
                actual: 32,
            }
        );
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(matches!(
            "zz".parse::<Signature>(),
            Err(TypesError::InvalidHex { .. })
        ));
    }

    #[test]
    fn zero_sentinel() {
        assert!(PublicKey::ZERO.is_zero());
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        assert!(!PublicKey::new(bytes).is_zero());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let sig = Signature::new([0x11; 64]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"{}\"", "11".repeat(64)));
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }
}
