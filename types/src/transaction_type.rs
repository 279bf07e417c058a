//! Transaction type tags and the link action enum.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 16-bit type tag written into every transaction header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum TransactionType {
    /// Links (or unlinks) a finalization voting key to an account.
    VotingKeyLink = 0x4143,
}

impl TransactionType {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VotingKeyLink => "voting_key_link",
        }
    }
}

impl TryFrom<u16> for TransactionType {
    type Error = TypesError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x4143 => Ok(Self::VotingKeyLink),
            other => Err(TypesError::UnknownTransactionType(other)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a key link transaction establishes or removes a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LinkAction {
    Unlink = 0,
    Link = 1,
}

impl LinkAction {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for LinkAction {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unlink),
            1 => Ok(Self::Link),
            other => Err(TypesError::UnknownLinkAction(other)),
        }
    }
}

impl fmt::Display for LinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlink => f.write_str("unlink"),
            Self::Link => f.write_str("link"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voting_key_link_tag() {
        assert_eq!(TransactionType::VotingKeyLink.as_u16(), 0x4143);
        assert_eq!(
            TransactionType::try_from(0x4143),
            Ok(TransactionType::VotingKeyLink)
        );
        assert_eq!(
            TransactionType::try_from(0x4154),
            Err(TypesError::UnknownTransactionType(0x4154))
        );
    }

    #[test]
    fn link_action_bytes() {
        assert_eq!(LinkAction::try_from(1), Ok(LinkAction::Link));
        assert_eq!(LinkAction::try_from(0), Ok(LinkAction::Unlink));
        assert_eq!(LinkAction::try_from(2), Err(TypesError::UnknownLinkAction(2)));
    }
}
