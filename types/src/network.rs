//! Network identifier carried in every transaction header.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies which network a transaction (or address) belongs to.
///
/// The discriminant is the byte written on the wire and used as the first
/// byte of every derived address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum NetworkType {
    /// The production network.
    MainNet = 0x68,
    /// The public test network.
    TestNet = 0x98,
    /// Private production deployments.
    Private = 0x78,
    /// Private test deployments.
    PrivateTest = 0xA8,
    Mijin = 0x60,
    MijinTest = 0x90,
}

impl NetworkType {
    pub const ALL: [Self; 6] = [
        Self::MainNet,
        Self::TestNet,
        Self::Private,
        Self::PrivateTest,
        Self::Mijin,
        Self::MijinTest,
    ];

    /// The wire byte for this network.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainNet => "mainnet",
            Self::TestNet => "testnet",
            Self::Private => "private",
            Self::PrivateTest => "privatetest",
            Self::Mijin => "mijin",
            Self::MijinTest => "mijintest",
        }
    }
}

impl TryFrom<u8> for NetworkType {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|network| network.as_u8() == value)
            .ok_or(TypesError::UnknownNetworkType(value))
    }
}

impl FromStr for NetworkType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase().replace(['_', '-'], "");
        Self::ALL
            .into_iter()
            .find(|network| network.as_str() == lowered)
            .ok_or_else(|| TypesError::UnknownNetworkName(s.to_string()))
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
