//! Transaction validation logic.
//!
//! Construction and decoding never validate; callers that are about to
//! announce a transaction run these checks explicitly.

use votelink_types::Deadline;

use crate::error::TransactionError;
use crate::voting_key_link::VotingKeyLinkTransaction;
use crate::Transaction;

/// Validate a transaction's structure at network time `now`.
///
/// This performs stateless validation only. Stateful checks (whether the
/// account already has a voting key for the window, epoch limits set by
/// the chain, etc.) are done by the node.
pub fn validate_transaction(tx: &Transaction, now: Deadline) -> Result<(), TransactionError> {
    let deadline = tx.deadline();
    if deadline.is_expired(now) {
        return Err(TransactionError::Expired { deadline, now });
    }

    match tx {
        Transaction::VotingKeyLink(link) => validate_voting_key_link(link),
    }
}

/// Validate a voting key link transaction specifically.
pub fn validate_voting_key_link(tx: &VotingKeyLinkTransaction) -> Result<(), TransactionError> {
    if tx.end_epoch() < tx.start_epoch() {
        return Err(TransactionError::InvalidEpochRange {
            start: tx.start_epoch(),
            end: tx.end_epoch(),
        });
    }

    if tx.linked_public_key().is_zero() {
        return Err(TransactionError::ZeroLinkedKey);
    }

    Ok(())
}
