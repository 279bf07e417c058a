//! JSON shapes used by node REST endpoints for transactions.
//!
//! Nodes report 64-bit integers as decimal strings and keys as hex. A
//! transaction read through these DTOs carries [`TransactionInfo`] built
//! from the `meta` block, which marks it as chain-originated.

use serde::{Deserialize, Serialize};
use votelink_types::{
    Deadline, LinkAction, NetworkType, PublicKey, Signature, TransactionType, TypesError,
    VotingKey,
};

use crate::account::PublicAccount;
use crate::base::{TransactionHeader, TransactionInfo, TransactionModel};
use crate::error::TransactionError;
use crate::voting_key_link::VotingKeyLinkTransaction;
use crate::Transaction;

/// `{ "meta": ..., "transaction": ... }` as returned by a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelopeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<TransactionMetaDto>,
    pub transaction: VotingKeyLinkTransactionDto,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetaDto {
    #[serde(with = "u64_string")]
    pub height: u64,
    pub index: u32,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merkle_component_hash: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingKeyLinkTransactionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_public_key: Option<String>,
    pub version: u8,
    pub network: u8,
    #[serde(rename = "type")]
    pub transaction_type: u16,
    #[serde(default, with = "u64_string")]
    pub max_fee: u64,
    #[serde(default, with = "u64_string")]
    pub deadline: u64,
    pub linked_public_key: String,
    pub start_epoch: u32,
    pub end_epoch: u32,
    pub link_action: u8,
}

impl TransactionEnvelopeDto {
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        serde_json::from_str(json).map_err(|e| TransactionError::Dto(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, TransactionError> {
        serde_json::to_string_pretty(self).map_err(|e| TransactionError::Dto(e.to_string()))
    }

    /// Describe a transaction in REST form.
    pub fn from_transaction(tx: &Transaction) -> Self {
        match tx {
            Transaction::VotingKeyLink(link) => Self {
                meta: link.transaction_info().map(TransactionMetaDto::from),
                transaction: VotingKeyLinkTransactionDto::from(link),
            },
        }
    }

    pub fn into_transaction(self) -> Result<Transaction, TransactionError> {
        let dto = self.transaction;
        let transaction_type = TransactionType::try_from(dto.transaction_type).map_err(dto_error)?;
        if transaction_type != VotingKeyLinkTransaction::TRANSACTION_TYPE {
            return Err(TransactionError::Dto(format!(
                "unsupported transaction type {transaction_type}"
            )));
        }

        if dto.version != VotingKeyLinkTransaction::VERSION {
            return Err(TransactionError::Dto(format!(
                "unsupported version {}",
                dto.version
            )));
        }

        let network = NetworkType::try_from(dto.network).map_err(dto_error)?;
        let signature = dto
            .signature
            .as_deref()
            .map(str::parse::<Signature>)
            .transpose()?
            .filter(|sig| !sig.is_zero());
        let signer = match dto.signer_public_key.as_deref() {
            Some(hex) => PublicAccount::resolve(hex.parse::<PublicKey>()?, network),
            None => None,
        };

        let header = TransactionHeader::new(
            network,
            VotingKeyLinkTransaction::VERSION,
            Deadline::new(dto.deadline),
            dto.max_fee,
        )
        .with_signature(signature)
        .with_signer(signer)
        .with_transaction_info(self.meta.map(TransactionInfo::from));

        let body = crate::codec::VotingKeyLinkBody {
            linked_public_key: dto.linked_public_key.parse::<VotingKey>()?,
            start_epoch: dto.start_epoch,
            end_epoch: dto.end_epoch,
            link_action: LinkAction::try_from(dto.link_action).map_err(dto_error)?,
        };

        Ok(VotingKeyLinkTransaction::from_parts(header, body).into())
    }
}

fn dto_error(e: TypesError) -> TransactionError {
    TransactionError::Dto(e.to_string())
}

impl From<&VotingKeyLinkTransaction> for VotingKeyLinkTransactionDto {
    fn from(tx: &VotingKeyLinkTransaction) -> Self {
        Self {
            signature: tx.signature().map(Signature::to_hex),
            signer_public_key: tx.signer().map(|s| s.public_key().to_hex()),
            version: tx.version(),
            network: tx.network_type().as_u8(),
            transaction_type: VotingKeyLinkTransaction::TRANSACTION_TYPE.as_u16(),
            max_fee: tx.max_fee(),
            deadline: tx.deadline().as_millis(),
            linked_public_key: tx.linked_public_key().to_hex(),
            start_epoch: tx.start_epoch(),
            end_epoch: tx.end_epoch(),
            link_action: tx.link_action().as_u8(),
        }
    }
}

impl From<TransactionMetaDto> for TransactionInfo {
    fn from(meta: TransactionMetaDto) -> Self {
        Self {
            height: meta.height,
            index: meta.index,
            id: meta.id,
            hash: meta.hash,
            merkle_component_hash: meta.merkle_component_hash,
        }
    }
}

impl From<&TransactionInfo> for TransactionMetaDto {
    fn from(info: &TransactionInfo) -> Self {
        Self {
            height: info.height,
            index: info.index,
            id: info.id.clone(),
            hash: info.hash.clone(),
            merkle_component_hash: info.merkle_component_hash.clone(),
        }
    }
}

/// u64 values written as decimal strings; numbers are accepted on input.
mod u64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
            Raw::Number(n) => Ok(n),
        }
    }
}
