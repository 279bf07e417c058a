//! Voting key link transaction: bind an account to a finalization voting key.

use votelink_types::{
    Address, Deadline, LinkAction, NetworkType, Signature, TransactionType, VotingKey,
};

use crate::account::PublicAccount;
use crate::base::{TransactionHeader, TransactionInfo, TransactionModel};
use crate::codec::VotingKeyLinkBody;

/// Links (or unlinks) a 48-byte voting key to the signer's account for the
/// finalization epochs `start_epoch..=end_epoch`.
///
/// `end_epoch >= start_epoch` is not checked here; see
/// [`validation::validate_voting_key_link`](crate::validation::validate_voting_key_link).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VotingKeyLinkTransaction {
    header: TransactionHeader,
    linked_public_key: VotingKey,
    start_epoch: u32,
    end_epoch: u32,
    link_action: LinkAction,
}

impl VotingKeyLinkTransaction {
    /// Build a standalone transaction. `max_fee` defaults to zero.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        deadline: Deadline,
        linked_public_key: VotingKey,
        start_epoch: u32,
        end_epoch: u32,
        link_action: LinkAction,
        network_type: NetworkType,
        max_fee: Option<u64>,
        signature: Option<Signature>,
        signer: Option<PublicAccount>,
    ) -> Self {
        let header = TransactionHeader::new(
            network_type,
            Self::VERSION,
            deadline,
            max_fee.unwrap_or(0),
        )
        .with_signature(signature)
        .with_signer(signer);
        Self {
            header,
            linked_public_key,
            start_epoch,
            end_epoch,
            link_action,
        }
    }

    /// Attach on-chain metadata, marking the transaction as chain-originated.
    pub fn with_transaction_info(self, info: TransactionInfo) -> Self {
        let header = self.header.clone().with_transaction_info(Some(info));
        self.with_header(header)
    }

    pub fn linked_public_key(&self) -> &VotingKey {
        &self.linked_public_key
    }

    pub fn start_epoch(&self) -> u32 {
        self.start_epoch
    }

    pub fn end_epoch(&self) -> u32 {
        self.end_epoch
    }

    pub fn link_action(&self) -> LinkAction {
        self.link_action
    }

    /// Address derived from the linked voting key on this transaction's network.
    pub fn linked_address(&self) -> Address {
        votelink_crypto::derive_address(self.linked_public_key.as_bytes(), self.network_type())
    }
}

impl TransactionModel for VotingKeyLinkTransaction {
    const TRANSACTION_TYPE: TransactionType = TransactionType::VotingKeyLink;
    const VERSION: u8 = 1;

    type Body = VotingKeyLinkBody;

    fn header(&self) -> &TransactionHeader {
        &self.header
    }

    fn with_header(self, header: TransactionHeader) -> Self {
        Self { header, ..self }
    }

    fn body(&self) -> VotingKeyLinkBody {
        VotingKeyLinkBody {
            linked_public_key: self.linked_public_key,
            start_epoch: self.start_epoch,
            end_epoch: self.end_epoch,
            link_action: self.link_action,
        }
    }

    fn from_parts(header: TransactionHeader, body: VotingKeyLinkBody) -> Self {
        Self {
            header,
            linked_public_key: body.linked_public_key,
            start_epoch: body.start_epoch,
            end_epoch: body.end_epoch,
            link_action: body.link_action,
        }
    }

    /// The signer and the holder of the linked key are both interested.
    fn should_notify_account(&self, address: &Address) -> bool {
        self.is_signed_by(address) || self.linked_address() == *address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votelink_types::PublicKey;

    fn sample(signer: Option<PublicAccount>) -> VotingKeyLinkTransaction {
        VotingKeyLinkTransaction::create(
            Deadline::new(1_000),
            VotingKey::new([0x44; 48]),
            1,
            3,
            LinkAction::Link,
            NetworkType::TestNet,
            None,
            None,
            signer,
        )
    }

    #[test]
    fn create_sets_family_constants() {
        let tx = sample(None);
        assert_eq!(tx.version(), 1);
        assert_eq!(tx.max_fee(), 0);
        assert_eq!(tx.network_type(), NetworkType::TestNet);
        assert!(tx.signature().is_none());
        assert!(tx.signer().is_none());
        assert!(tx.is_unannounced());
    }

    #[test]
    fn resolve_aliases_is_identity() {
        let tx = sample(None);
        assert_eq!(tx.clone().resolve_aliases(), tx);
    }

    #[test]
    fn signer_is_notified() {
        let signer = PublicAccount::new(PublicKey::new([0x10; 32]), NetworkType::TestNet);
        let tx = sample(Some(signer.clone()));
        assert!(tx.is_signed_by(&signer.address()));
        assert!(tx.should_notify_account(&signer.address()));
    }

    #[test]
    fn linked_key_holder_is_notified() {
        let tx = sample(None);
        let linked = votelink_crypto::derive_address(&[0x44; 48], NetworkType::TestNet);
        assert!(tx.should_notify_account(&linked));
        let other_network = votelink_crypto::derive_address(&[0x44; 48], NetworkType::MainNet);
        assert!(!tx.should_notify_account(&other_network));
    }

    #[test]
    fn to_aggregate_binds_signer() {
        let signer = PublicAccount::new(PublicKey::new([0x10; 32]), NetworkType::TestNet);
        let inner = sample(None).to_aggregate(signer.clone());
        assert_eq!(inner.signer(), &signer);
        assert_eq!(inner.transaction().signer(), Some(&signer));
        assert_eq!(inner.to_embedded_bytes().len(), 105);
    }

    #[test]
    fn transaction_info_state() {
        let info = TransactionInfo {
            height: 0,
            index: 0,
            id: "1".into(),
            hash: Some("AA".into()),
            merkle_component_hash: Some("AA".into()),
        };
        let tx = sample(None).with_transaction_info(info.clone());
        assert!(tx.is_unconfirmed());
        assert!(!tx.is_confirmed());
        assert!(!tx.has_missing_signatures());

        let tx = sample(None).with_transaction_info(TransactionInfo { height: 5, ..info });
        assert!(tx.is_confirmed());
        assert!(!tx.is_unannounced());
    }

    #[test]
    fn signing_bytes_prefix_generation_hash() {
        let tx = sample(None);
        let generation_hash = [0xEE; 32];
        let bytes = tx.signing_bytes(&generation_hash);
        assert_eq!(&bytes[..32], &generation_hash);
        assert_eq!(&bytes[32..], &tx.to_bytes()[108..]);
    }
}
