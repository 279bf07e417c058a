//! Fields and behaviour shared by every transaction type.
//!
//! Each concrete transaction composes a [`TransactionHeader`] and implements
//! [`TransactionModel`], which supplies the common accessors, the wire
//! encoding of both forms and payload decoding on top of the type's
//! [`BodyCodec`].

use votelink_types::{Address, Deadline, NetworkType, PublicKey, Signature, TransactionType};

use crate::account::PublicAccount;
use crate::codec::{
    self, BodyCodec, CodecError, EmbeddedHeader, StandaloneHeader, TransactionBuilder,
    SIGNING_OFFSET,
};
use crate::error::TransactionError;
use crate::inner::{InnerTransaction, Parsed};

/// Where a transaction sits on chain, as reported by a node.
///
/// Its presence marks a transaction as chain-originated rather than locally built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInfo {
    /// Block height; zero while the transaction is still unconfirmed.
    pub height: u64,
    /// Position within the block.
    pub index: u32,
    /// Node-assigned database id.
    pub id: String,
    pub hash: Option<String>,
    pub merkle_component_hash: Option<String>,
}

/// Common header carried by every transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionHeader {
    network_type: NetworkType,
    version: u8,
    deadline: Deadline,
    max_fee: u64,
    signature: Option<Signature>,
    signer: Option<PublicAccount>,
    transaction_info: Option<TransactionInfo>,
}

impl TransactionHeader {
    pub fn new(network_type: NetworkType, version: u8, deadline: Deadline, max_fee: u64) -> Self {
        Self {
            network_type,
            version,
            deadline,
            max_fee,
            signature: None,
            signer: None,
            transaction_info: None,
        }
    }

    pub fn with_signature(mut self, signature: Option<Signature>) -> Self {
        self.signature = signature;
        self
    }

    pub fn with_signer(mut self, signer: Option<PublicAccount>) -> Self {
        self.signer = signer;
        self
    }

    pub fn with_transaction_info(mut self, info: Option<TransactionInfo>) -> Self {
        self.transaction_info = info;
        self
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn max_fee(&self) -> u64 {
        self.max_fee
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn signer(&self) -> Option<&PublicAccount> {
        self.signer.as_ref()
    }

    pub fn transaction_info(&self) -> Option<&TransactionInfo> {
        self.transaction_info.as_ref()
    }
}

/// The capability set every transaction type implements.
pub trait TransactionModel: Sized {
    /// Type tag of this transaction family.
    const TRANSACTION_TYPE: TransactionType;
    /// Version written by locally constructed transactions.
    const VERSION: u8;

    type Body: BodyCodec;

    fn header(&self) -> &TransactionHeader;

    /// Replace the common header, keeping the type-specific fields.
    fn with_header(self, header: TransactionHeader) -> Self;

    /// The type-specific fields in codec form.
    fn body(&self) -> Self::Body;

    /// Reassemble a transaction from a decoded header and body.
    fn from_parts(header: TransactionHeader, body: Self::Body) -> Self;

    /// Whether an event about this transaction should be pushed to `address`.
    fn should_notify_account(&self, address: &Address) -> bool;

    /// Resolve namespace aliases referenced by the transaction.
    fn resolve_aliases(self) -> Self {
        self
    }

    fn network_type(&self) -> NetworkType {
        self.header().network_type()
    }

    fn version(&self) -> u8 {
        self.header().version()
    }

    fn deadline(&self) -> Deadline {
        self.header().deadline()
    }

    fn max_fee(&self) -> u64 {
        self.header().max_fee()
    }

    fn signature(&self) -> Option<&Signature> {
        self.header().signature()
    }

    fn signer(&self) -> Option<&PublicAccount> {
        self.header().signer()
    }

    fn transaction_info(&self) -> Option<&TransactionInfo> {
        self.header().transaction_info()
    }

    /// Whether `address` is the signer's address.
    fn is_signed_by(&self, address: &Address) -> bool {
        self.signer()
            .is_some_and(|signer| signer.address() == *address)
    }

    /// Not yet announced to any node.
    fn is_unannounced(&self) -> bool {
        self.transaction_info().is_none()
    }

    /// Announced and waiting in a node's unconfirmed pool.
    fn is_unconfirmed(&self) -> bool {
        self.transaction_info()
            .is_some_and(|info| info.height == 0 && info.hash == info.merkle_component_hash)
    }

    /// Announced but still waiting for cosignatures.
    fn has_missing_signatures(&self) -> bool {
        self.transaction_info()
            .is_some_and(|info| info.height == 0 && info.hash != info.merkle_component_hash)
    }

    /// Included in a block.
    fn is_confirmed(&self) -> bool {
        self.transaction_info().is_some_and(|info| info.height > 0)
    }

    /// Map the fields into the codec in wire order.
    ///
    /// A missing signer or signature is written as zeros.
    fn to_builder(&self, embedded: bool) -> TransactionBuilder<Self::Body> {
        let signer = self
            .signer()
            .map(|s| *s.public_key())
            .unwrap_or(PublicKey::ZERO);
        self.to_builder_signed_by(embedded, signer)
    }

    /// As [`to_builder`](Self::to_builder) with an explicit signer key.
    fn to_builder_signed_by(
        &self,
        embedded: bool,
        signer: PublicKey,
    ) -> TransactionBuilder<Self::Body> {
        let header = self.header();
        if embedded {
            TransactionBuilder::Embedded {
                header: EmbeddedHeader {
                    signer,
                    version: header.version(),
                    network: header.network_type(),
                    transaction_type: Self::TRANSACTION_TYPE,
                },
                body: self.body(),
            }
        } else {
            TransactionBuilder::Standalone {
                header: StandaloneHeader {
                    signature: header.signature().copied().unwrap_or(Signature::ZERO),
                    signer,
                    version: header.version(),
                    network: header.network_type(),
                    transaction_type: Self::TRANSACTION_TYPE,
                    max_fee: header.max_fee(),
                    deadline: header.deadline().as_millis(),
                },
                body: self.body(),
            }
        }
    }

    /// Standalone wire bytes.
    fn to_bytes(&self) -> Vec<u8> {
        self.to_builder(false).to_bytes()
    }

    /// Embedded wire bytes.
    fn to_embedded_bytes(&self) -> Vec<u8> {
        self.to_builder(true).to_bytes()
    }

    /// Standalone payload as upper-case hex.
    fn to_payload(&self) -> String {
        hex::encode_upper(self.to_bytes())
    }

    /// Standalone encoded size in bytes.
    fn size(&self) -> usize {
        self.to_builder(false).size()
    }

    /// The bytes a signer signs: the network generation hash followed by the
    /// standalone payload from the version field onwards.
    fn signing_bytes(&self, generation_hash: &[u8]) -> Vec<u8> {
        let payload = self.to_bytes();
        let mut bytes = Vec::with_capacity(generation_hash.len() + payload.len() - SIGNING_OFFSET);
        bytes.extend_from_slice(generation_hash);
        bytes.extend_from_slice(&payload[SIGNING_OFFSET..]);
        bytes
    }

    /// Convert into the embedded form bound to `signer`.
    fn to_aggregate(self, signer: PublicAccount) -> InnerTransaction<Self> {
        let header = self.header().clone().with_signer(Some(signer.clone()));
        InnerTransaction::bind(signer, self.with_header(header))
    }

    /// Parse a hex payload in the embedded or standalone form.
    fn from_payload(payload: &str, embedded: bool) -> Result<Parsed<Self>, TransactionError> {
        let bytes = codec::decode_hex(payload)?;
        Self::from_bytes(&bytes, embedded)
    }

    /// Parse raw payload bytes in the embedded or standalone form.
    ///
    /// The version byte must equal [`Self::VERSION`]. Embedded payloads carry
    /// no deadline or fee; they decode as [`Deadline::EMPTY`] and zero. An
    /// all-zero signer key leaves the signer unset. Embedded results are
    /// wrapped in an [`InnerTransaction`] bound to the decoded signer key.
    fn from_bytes(bytes: &[u8], embedded: bool) -> Result<Parsed<Self>, TransactionError> {
        let builder = TransactionBuilder::<Self::Body>::from_bytes(bytes, embedded)?;
        let signature = codec::extract_signature(bytes, embedded);

        let (signer_key, network, version, deadline, max_fee, body) = match builder {
            TransactionBuilder::Standalone { header, body } => (
                header.signer,
                header.network,
                header.version,
                Deadline::new(header.deadline),
                header.max_fee,
                body,
            ),
            TransactionBuilder::Embedded { header, body } => (
                header.signer,
                header.network,
                header.version,
                Deadline::EMPTY,
                0,
                body,
            ),
        };

        if version != Self::VERSION {
            return Err(CodecError::UnsupportedVersion {
                expected: Self::VERSION,
                found: version,
            }
            .into());
        }

        let header = TransactionHeader::new(network, Self::VERSION, deadline, max_fee)
            .with_signature(signature)
            .with_signer(PublicAccount::resolve(signer_key, network));
        let transaction = Self::from_parts(header, body);

        tracing::debug!(
            transaction_type = %Self::TRANSACTION_TYPE,
            network = %network,
            embedded,
            size = bytes.len(),
            "decoded transaction payload"
        );

        Ok(if embedded {
            Parsed::Embedded(InnerTransaction::bind(
                PublicAccount::new(signer_key, network),
                transaction,
            ))
        } else {
            Parsed::Standalone(transaction)
        })
    }
}
