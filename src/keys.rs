//! Encryption key shares over an [`EncryptionGroup`]

use num_bigint::BigUint;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hash::{HashValue, Hashable};
use crate::types::EncryptionGroup;
use crate::utils::mod_exp;

/// Public key (share) `g^sk mod p`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncryptionPublicKey {
    pub(crate) value: BigUint,
    pub(crate) group: Arc<EncryptionGroup>,
}

impl EncryptionPublicKey {
    /// Create a new public key
    pub fn new(value: BigUint, group: Arc<EncryptionGroup>) -> Self {
        EncryptionPublicKey { value, group }
    }

    /// Get the public value
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Get the group the key lives in
    pub fn group(&self) -> &Arc<EncryptionGroup> {
        &self.group
    }

    /// Whether `private_key` is the discrete log of this key in the same group
    pub fn matches(&self, private_key: &EncryptionPrivateKey) -> bool {
        self.group == private_key.group
            && mod_exp(&self.group.g, &private_key.value, &self.group.p) == self.value
    }

    /// Check that the value lies in the order-q subgroup
    pub fn is_valid(&self) -> bool {
        self.group.is_member(&self.value)
    }
}

impl fmt::Display for EncryptionPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptionPublicKey({} bits)", self.group.bit_size())
    }
}

impl Hashable for EncryptionPublicKey {
    fn elements_to_hash(&self) -> Vec<HashValue<'_>> {
        vec![(&self.value).into(), HashValue::composite(self.group.as_ref())]
    }
}

/// Private key (share) in `[0, q)`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncryptionPrivateKey {
    pub(crate) value: BigUint,
    pub(crate) group: Arc<EncryptionGroup>,
}

impl EncryptionPrivateKey {
    /// Create a new private key
    pub fn new(value: BigUint, group: Arc<EncryptionGroup>) -> Self {
        EncryptionPrivateKey { value, group }
    }

    /// Get the secret exponent
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn group(&self) -> &Arc<EncryptionGroup> {
        &self.group
    }
}

impl fmt::Display for EncryptionPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptionPrivateKey(***)")
    }
}

/// Key pair held by one authority
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyPair {
    pub public_key: EncryptionPublicKey,
    pub private_key: EncryptionPrivateKey,
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({} bits)", self.public_key.group.bit_size())
    }
}
