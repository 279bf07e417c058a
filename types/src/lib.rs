//! Fundamental value types for voting key link transactions.
//!
//! This crate defines the primitives shared by every other crate in the workspace:
//! network and transaction type tags, keys, signatures, deadlines and addresses.

pub mod address;
pub mod error;
pub mod keys;
pub mod network;
pub mod time;
pub mod transaction_type;

pub use address::Address;
pub use error::TypesError;
pub use keys::{PublicKey, Signature, VotingKey};
pub use network::NetworkType;
pub use time::Deadline;
pub use transaction_type::{LinkAction, TransactionType};
