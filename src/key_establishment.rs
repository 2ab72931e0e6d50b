//! Distributed key establishment
//!
//! Each authority generates its own key pair in a shared [`EncryptionGroup`].
//! The election public key is the product of the public shares, which
//! corresponds to the sum of the private shares mod q. That sum is never
//! reconstructed.

use num_bigint::BigUint;
use num_traits::One;
use std::sync::Arc;
use tracing::debug;

use crate::error::{PrimitiveError, Result};
use crate::keys::{EncryptionPrivateKey, EncryptionPublicKey, KeyPair};
use crate::random::RandomGenerator;
use crate::types::EncryptionGroup;
use crate::utils::mod_exp;

/// Generate a key pair: `sk` uniform in `[0, q)`, `pk = g^sk mod p`
pub fn generate_key_pair<R: RandomGenerator + ?Sized>(
    group: &Arc<EncryptionGroup>,
    rng: &mut R,
) -> KeyPair {
    let sk = rng.random_in_zq(&group.q);
    let pk = mod_exp(&group.g, &sk, &group.p);

    debug!(bits = group.bit_size(), "generated key pair share");

    KeyPair {
        public_key: EncryptionPublicKey::new(pk, Arc::clone(group)),
        private_key: EncryptionPrivateKey::new(sk, Arc::clone(group)),
    }
}

/// Combine public key shares into the election public key
///
/// # Errors
///
/// - [`PrimitiveError::EmptyKeyShares`] if `shares` is empty
/// - [`PrimitiveError::GroupMismatch`] if a share belongs to a different group
///   than the first one
pub fn combine_public_keys(shares: &[EncryptionPublicKey]) -> Result<EncryptionPublicKey> {
    let first = shares.first().ok_or(PrimitiveError::EmptyKeyShares)?;
    let group = &first.group;

    let mut combined = BigUint::one();
    for (index, share) in shares.iter().enumerate() {
        if !Arc::ptr_eq(&share.group, group) && share.group != *group {
            return Err(PrimitiveError::GroupMismatch { index });
        }
        combined = (combined * &share.value) % &group.p;
    }

    debug!(shares = shares.len(), "combined public key shares");

    Ok(EncryptionPublicKey::new(combined, Arc::clone(group)))
}
