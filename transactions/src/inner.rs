//! Embedded (aggregate-inner) form of a transaction and the decode result.

use crate::account::PublicAccount;
use crate::base::TransactionModel;

/// A transaction prepared for embedding in an aggregate, bound to its signer.
///
/// Embedded transactions carry no signature, fee or deadline of their own;
/// those live once on the enclosing aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InnerTransaction<T> {
    signer: PublicAccount,
    transaction: T,
}

impl<T> InnerTransaction<T> {
    /// Pair a transaction with the account that signs it inside an aggregate.
    pub fn bind(signer: PublicAccount, transaction: T) -> Self {
        Self {
            signer,
            transaction,
        }
    }

    pub fn signer(&self) -> &PublicAccount {
        &self.signer
    }

    pub fn transaction(&self) -> &T {
        &self.transaction
    }

    pub fn into_transaction(self) -> T {
        self.transaction
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> InnerTransaction<U> {
        InnerTransaction {
            signer: self.signer,
            transaction: f(self.transaction),
        }
    }
}

impl<T: TransactionModel> InnerTransaction<T> {
    /// Embedded wire bytes, written under this binding's signer.
    pub fn to_embedded_bytes(&self) -> Vec<u8> {
        self.transaction
            .to_builder_signed_by(true, *self.signer.public_key())
            .to_bytes()
    }

    /// Embedded payload as upper-case hex.
    pub fn to_payload(&self) -> String {
        hex::encode_upper(self.to_embedded_bytes())
    }
}

/// Result of decoding a payload: which form it was in decides the shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parsed<T> {
    Standalone(T),
    Embedded(InnerTransaction<T>),
}

impl<T> Parsed<T> {
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }

    pub fn transaction(&self) -> &T {
        match self {
            Self::Standalone(tx) => tx,
            Self::Embedded(inner) => inner.transaction(),
        }
    }

    pub fn into_transaction(self) -> T {
        match self {
            Self::Standalone(tx) => tx,
            Self::Embedded(inner) => inner.into_transaction(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        match self {
            Self::Standalone(tx) => Parsed::Standalone(f(tx)),
            Self::Embedded(inner) => Parsed::Embedded(inner.map(f)),
        }
    }
}
