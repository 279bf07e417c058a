//! Error type for parsing and constructing primitive values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid hex for {kind}: {reason}")]
    InvalidHex { kind: &'static str, reason: String },

    #[error("invalid length for {kind}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unknown network type: {0:#04x}")]
    UnknownNetworkType(u8),

    #[error("unknown network name: {0}")]
    UnknownNetworkName(String),

    #[error("unknown transaction type: {0:#06x}")]
    UnknownTransactionType(u16),

    #[error("unknown link action: {0}")]
    UnknownLinkAction(u8),

    #[error("invalid deadline: {0}")]
    InvalidDeadline(String),
}
