//! Transaction models, their binary codec and supporting services.
//!
//! Transaction types:
//! - **VotingKeyLink**: link or unlink a finalization voting key to an account
//!   for a window of finalization epochs
//!
//! Every type composes a shared [`TransactionHeader`] and implements
//! [`TransactionModel`]; [`Transaction`] is the closed union over all of them.

pub mod account;
pub mod base;
pub mod codec;
pub mod config;
pub mod dto;
pub mod error;
pub mod factory;
pub mod inner;
pub mod validation;
pub mod voting_key_link;

pub use account::PublicAccount;
pub use base::{TransactionHeader, TransactionInfo, TransactionModel};
pub use codec::CodecError;
pub use config::TransactionConfig;
pub use error::TransactionError;
pub use factory::TransactionFactory;
pub use inner::{InnerTransaction, Parsed};
pub use voting_key_link::VotingKeyLinkTransaction;

use votelink_types::{Address, Deadline, NetworkType, Signature, TransactionType};

/// The unified transaction enum wrapping all transaction types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transaction {
    VotingKeyLink(VotingKeyLinkTransaction),
}

impl Transaction {
    /// Parse a hex payload of any known type, dispatching on its type tag.
    pub fn from_payload(payload: &str, embedded: bool) -> Result<Parsed<Self>, TransactionError> {
        let bytes = codec::decode_hex(payload)?;
        Self::from_bytes(&bytes, embedded)
    }

    /// Parse raw payload bytes of any known type.
    pub fn from_bytes(bytes: &[u8], embedded: bool) -> Result<Parsed<Self>, TransactionError> {
        let transaction_type = codec::peek_transaction_type(bytes, embedded)?;
        tracing::trace!(%transaction_type, embedded, "dispatching payload");
        match transaction_type {
            TransactionType::VotingKeyLink => {
                Ok(VotingKeyLinkTransaction::from_bytes(bytes, embedded)?.map(Self::VotingKeyLink))
            }
        }
    }

    fn header(&self) -> &TransactionHeader {
        match self {
            Self::VotingKeyLink(tx) => tx.header(),
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::VotingKeyLink(_) => VotingKeyLinkTransaction::TRANSACTION_TYPE,
        }
    }

    pub fn network_type(&self) -> NetworkType {
        self.header().network_type()
    }

    pub fn version(&self) -> u8 {
        self.header().version()
    }

    pub fn deadline(&self) -> Deadline {
        self.header().deadline()
    }

    pub fn max_fee(&self) -> u64 {
        self.header().max_fee()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.header().signature()
    }

    pub fn signer(&self) -> Option<&PublicAccount> {
        self.header().signer()
    }

    pub fn transaction_info(&self) -> Option<&TransactionInfo> {
        self.header().transaction_info()
    }

    pub fn is_signed_by(&self, address: &Address) -> bool {
        match self {
            Self::VotingKeyLink(tx) => tx.is_signed_by(address),
        }
    }

    pub fn should_notify_account(&self, address: &Address) -> bool {
        match self {
            Self::VotingKeyLink(tx) => tx.should_notify_account(address),
        }
    }

    pub fn resolve_aliases(self) -> Self {
        match self {
            Self::VotingKeyLink(tx) => Self::VotingKeyLink(tx.resolve_aliases()),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::VotingKeyLink(tx) => tx.to_bytes(),
        }
    }

    pub fn to_embedded_bytes(&self) -> Vec<u8> {
        match self {
            Self::VotingKeyLink(tx) => tx.to_embedded_bytes(),
        }
    }

    pub fn to_payload(&self) -> String {
        hex::encode_upper(self.to_bytes())
    }

    pub fn size(&self) -> usize {
        match self {
            Self::VotingKeyLink(tx) => tx.size(),
        }
    }

    pub fn to_aggregate(self, signer: PublicAccount) -> InnerTransaction<Self> {
        match self {
            Self::VotingKeyLink(tx) => tx.to_aggregate(signer).map(Self::VotingKeyLink),
        }
    }
}

impl From<VotingKeyLinkTransaction> for Transaction {
    fn from(tx: VotingKeyLinkTransaction) -> Self {
        Self::VotingKeyLink(tx)
    }
}
