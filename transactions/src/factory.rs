//! Builds transactions with network settings taken from configuration.

use votelink_types::{Deadline, LinkAction, VotingKey};

use crate::config::TransactionConfig;
use crate::error::TransactionError;
use crate::voting_key_link::VotingKeyLinkTransaction;

/// Fills in network type, deadline and fee from a [`TransactionConfig`].
#[derive(Clone, Debug, Default)]
pub struct TransactionFactory {
    config: TransactionConfig,
}

impl TransactionFactory {
    pub fn new(config: TransactionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransactionConfig {
        &self.config
    }

    /// Current network time, for validating deadlines.
    pub fn network_time(&self) -> Deadline {
        Deadline::now(self.config.epoch_adjustment_secs)
    }

    /// A deadline `deadline_secs` from now.
    pub fn deadline(&self) -> Result<Deadline, TransactionError> {
        Ok(Deadline::create(
            self.config.epoch_adjustment_secs,
            self.config.deadline_secs,
        )?)
    }

    /// A deadline `deadline_secs` after the given Unix time.
    pub fn deadline_at(&self, now_unix_millis: u64) -> Result<Deadline, TransactionError> {
        Ok(Deadline::create_at(
            now_unix_millis,
            self.config.epoch_adjustment_secs,
            self.config.deadline_secs,
        )?)
    }

    /// An unsigned voting key link transaction expiring `deadline_secs` from now.
    pub fn voting_key_link(
        &self,
        linked_public_key: VotingKey,
        start_epoch: u32,
        end_epoch: u32,
        link_action: LinkAction,
    ) -> Result<VotingKeyLinkTransaction, TransactionError> {
        let deadline = self.deadline()?;
        Ok(self.build_voting_key_link(deadline, linked_public_key, start_epoch, end_epoch, link_action))
    }

    /// As [`voting_key_link`](Self::voting_key_link), with the clock supplied.
    pub fn voting_key_link_at(
        &self,
        now_unix_millis: u64,
        linked_public_key: VotingKey,
        start_epoch: u32,
        end_epoch: u32,
        link_action: LinkAction,
    ) -> Result<VotingKeyLinkTransaction, TransactionError> {
        let deadline = self.deadline_at(now_unix_millis)?;
        Ok(self.build_voting_key_link(deadline, linked_public_key, start_epoch, end_epoch, link_action))
    }

    fn build_voting_key_link(
        &self,
        deadline: Deadline,
        linked_public_key: VotingKey,
        start_epoch: u32,
        end_epoch: u32,
        link_action: LinkAction,
    ) -> VotingKeyLinkTransaction {
        tracing::debug!(
            network = %self.config.network_type,
            %deadline,
            start_epoch,
            end_epoch,
            %link_action,
            "building voting key link transaction"
        );
        VotingKeyLinkTransaction::create(
            deadline,
            linked_public_key,
            start_epoch,
            end_epoch,
            link_action,
            self.config.network_type,
            Some(self.config.max_fee),
            None,
            None,
        )
    }
}
