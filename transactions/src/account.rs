//! Public accounts: a public key bound to the network it lives on.

use votelink_types::{Address, NetworkType, PublicKey, TypesError};

/// A resolved account reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicAccount {
    public_key: PublicKey,
    network_type: NetworkType,
}

impl PublicAccount {
    pub fn new(public_key: PublicKey, network_type: NetworkType) -> Self {
        Self {
            public_key,
            network_type,
        }
    }

    /// Parse a hex public key.
    pub fn from_hex(public_key: &str, network_type: NetworkType) -> Result<Self, TypesError> {
        Ok(Self::new(public_key.parse()?, network_type))
    }

    /// Resolve a signer key read off the wire.
    ///
    /// An all-zero key is the "not yet resolved" sentinel and yields `None`
    /// rather than an account for the zero key.
    pub fn resolve(public_key: PublicKey, network_type: NetworkType) -> Option<Self> {
        if public_key.is_zero() {
            None
        } else {
            Some(Self::new(public_key, network_type))
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn address(&self) -> Address {
        votelink_crypto::derive_address(self.public_key.as_bytes(), self.network_type)
    }
}
