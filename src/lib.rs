//! # Cryptographic primitives for verifiable e-voting
//!
//! This library provides the building blocks the voting protocol runs on:
//! - Distributed ElGamal key establishment over a prime-order subgroup of `Z_p^*`
//! - Random polynomials over a prime field and per-candidate secret points
//! - A canonical recursive hash over nested protocol data, used for
//!   Fiat-Shamir challenges
//!
//! ## Features
//!
//! - **Split private key**: every authority keeps its own share, only public
//!   shares are combined
//! - **Global point uniqueness**: abscissas never repeat within one
//!   `gen_points` call
//! - **Structure-aware hashing**: nesting and order are part of the digest
//! - **Configurable digests**: SHA-2 and BLAKE2, truncated to a fixed length L
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use num_bigint::BigUint;
//! use evote_primitives::{
//!     combine_public_keys, generate_key_pair, EncryptionGroup, HashValue, RecursiveHash,
//! };
//!
//! let group = Arc::new(
//!     EncryptionGroup::new(BigUint::from(23u32), BigUint::from(11u32), BigUint::from(4u32))
//!         .unwrap(),
//! );
//!
//! // Each authority generates its own share
//! let mut rng = rand::thread_rng();
//! let shares: Vec<_> = (0..3)
//!     .map(|_| generate_key_pair(&group, &mut rng).public_key)
//!     .collect();
//!
//! // The election key is the product of the public shares
//! let election_key = combine_public_keys(&shares).unwrap();
//!
//! // Hash the key into a challenge
//! let hash = RecursiveHash::with_defaults();
//! let challenge = hash.hash(&[HashValue::composite(&election_key), "round-1".into()]);
//! assert_eq!(challenge.len(), 32);
//! ```

pub mod config;
pub mod conversion;
pub mod error;
pub mod hash;
pub mod key_establishment;
pub mod keys;
pub mod polynomial;
pub mod random;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use config::{HashConfig, LengthPolicy};
pub use conversion::{ByteConverter, CanonicalConversion};
pub use error::{PrimitiveError, Result};
pub use hash::{DigestAlgorithm, HashValue, Hashable, RecursiveHash};
pub use key_establishment::{combine_public_keys, generate_key_pair};
pub use keys::{EncryptionPrivateKey, EncryptionPublicKey, KeyPair};
pub use polynomial::Polynomial;
pub use random::RandomGenerator;
pub use types::{Election, EncryptionGroup, Point, PointsAndZeroImages, PrimeField};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
