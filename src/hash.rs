//! Canonical recursive hashing of nested protocol data
//!
//! A list of values `v_1 .. v_k` is hashed as follows:
//!
//! - `k = 0`: the digest of the empty input,
//! - `k = 1`: the hash of `v_1` itself,
//! - `k >= 2`: the digest of `H(v_1) || .. || H(v_k)`.
//!
//! Leaves (bytes, text, integers) are hashed through their canonical byte
//! encoding, sequences and [`Hashable`] composites recurse into their
//! elements. Every sub-value is hashed before concatenation, so two inputs
//! whose raw bytes concatenate identically but whose nesting differs do not
//! collide. All digests are truncated to the configured length L.

use blake2::{Blake2b512, Blake2s256};
use num_bigint::BigUint;
use sha2::digest::DynDigest;
use sha2::{Sha256, Sha384, Sha512};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::HashConfig;
use crate::conversion::{ByteConverter, CanonicalConversion};
use crate::error::{PrimitiveError, Result};

/// Digest primitive underlying a [`RecursiveHash`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
    Blake2s256,
    Blake2b512,
}

impl DigestAlgorithm {
    /// Standard name of the algorithm, as accepted by `FromStr`
    pub fn identifier(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
            DigestAlgorithm::Blake2s256 => "BLAKE2s-256",
            DigestAlgorithm::Blake2b512 => "BLAKE2b-512",
        }
    }

    /// Native output length in bytes
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 | DigestAlgorithm::Blake2s256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 | DigestAlgorithm::Blake2b512 => 64,
        }
    }

    // A fresh engine for every digest, never shared between calls.
    fn new_hasher(&self) -> Box<dyn DynDigest> {
        match self {
            DigestAlgorithm::Sha256 => Box::new(Sha256::default()),
            DigestAlgorithm::Sha384 => Box::new(Sha384::default()),
            DigestAlgorithm::Sha512 => Box::new(Sha512::default()),
            DigestAlgorithm::Blake2s256 => Box::new(Blake2s256::default()),
            DigestAlgorithm::Blake2b512 => Box::new(Blake2b512::default()),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SHA-256" | "SHA256" => Ok(DigestAlgorithm::Sha256),
            "SHA-384" | "SHA384" => Ok(DigestAlgorithm::Sha384),
            "SHA-512" | "SHA512" => Ok(DigestAlgorithm::Sha512),
            "BLAKE2S-256" | "BLAKE2S256" => Ok(DigestAlgorithm::Blake2s256),
            "BLAKE2B-512" | "BLAKE2B512" => Ok(DigestAlgorithm::Blake2b512),
            _ => Err(PrimitiveError::DigestUnavailable(s.to_string())),
        }
    }
}

/// Domain values that hash as the ordered sequence of their parts
pub trait Hashable {
    /// The parts to include in the hash, in a fixed order
    fn elements_to_hash(&self) -> Vec<HashValue<'_>>;
}

/// A value accepted by [`RecursiveHash`]
#[derive(Clone)]
pub enum HashValue<'a> {
    Bytes(Cow<'a, [u8]>),
    Text(Cow<'a, str>),
    Integer(Cow<'a, BigUint>),
    Sequence(Vec<HashValue<'a>>),
    Composite(&'a dyn Hashable),
}

impl<'a> HashValue<'a> {
    pub fn composite<T: Hashable>(value: &'a T) -> Self {
        HashValue::Composite(value)
    }

    pub fn sequence<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<HashValue<'a>>,
    {
        HashValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for HashValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashValue::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            HashValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            HashValue::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            HashValue::Sequence(values) => f.debug_tuple("Sequence").field(values).finish(),
            HashValue::Composite(value) => f
                .debug_tuple("Composite")
                .field(&value.elements_to_hash())
                .finish(),
        }
    }
}

impl<'a> From<&'a [u8]> for HashValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        HashValue::Bytes(Cow::Borrowed(value))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for HashValue<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        HashValue::Bytes(Cow::Borrowed(value.as_slice()))
    }
}

impl From<Vec<u8>> for HashValue<'_> {
    fn from(value: Vec<u8>) -> Self {
        HashValue::Bytes(Cow::Owned(value))
    }
}

impl<'a> From<&'a str> for HashValue<'a> {
    fn from(value: &'a str) -> Self {
        HashValue::Text(Cow::Borrowed(value))
    }
}

impl From<String> for HashValue<'_> {
    fn from(value: String) -> Self {
        HashValue::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a BigUint> for HashValue<'a> {
    fn from(value: &'a BigUint) -> Self {
        HashValue::Integer(Cow::Borrowed(value))
    }
}

impl From<BigUint> for HashValue<'_> {
    fn from(value: BigUint) -> Self {
        HashValue::Integer(Cow::Owned(value))
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for HashValue<'_> {
                fn from(value: $t) -> Self {
                    HashValue::Integer(Cow::Owned(BigUint::from(value)))
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl<'a> From<Vec<HashValue<'a>>> for HashValue<'a> {
    fn from(values: Vec<HashValue<'a>>) -> Self {
        HashValue::Sequence(values)
    }
}

impl<'a> From<&'a dyn Hashable> for HashValue<'a> {
    fn from(value: &'a dyn Hashable) -> Self {
        HashValue::Composite(value)
    }
}

/// Recursive hash over [`HashValue`]s with output length L.
///
/// Holds no digest state; each call builds its own engine, so one instance
/// can be shared freely between threads.
#[derive(Clone, Debug)]
pub struct RecursiveHash<C = CanonicalConversion> {
    config: HashConfig,
    converter: C,
}

impl RecursiveHash<CanonicalConversion> {
    /// SHA-256 with L = 32 bytes and the canonical conversion
    pub fn with_defaults() -> Self {
        RecursiveHash {
            config: HashConfig::default(),
            converter: CanonicalConversion,
        }
    }
}

impl<C: ByteConverter> RecursiveHash<C> {
    /// Create a hash, failing if the digest algorithm cannot produce L bytes
    pub fn new(config: HashConfig, converter: C) -> Result<Self> {
        config.validate()?;

        debug!(
            algorithm = config.digest_algorithm.identifier(),
            output_len = config.security_parameter_l,
            policy = %config.length_policy,
            "configured recursive hash"
        );

        Ok(RecursiveHash { config, converter })
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Output length L in bytes
    pub fn output_len(&self) -> usize {
        self.config.security_parameter_l
    }

    /// Hash an ordered list of values
    pub fn hash(&self, values: &[HashValue<'_>]) -> Vec<u8> {
        match values {
            [] => self.hash_bytes(&[]),
            [value] => self.hash_value(value),
            _ => {
                let mut hasher = self.config.digest_algorithm.new_hasher();
                for value in values {
                    hasher.update(&self.hash_value(value));
                }
                self.truncate(hasher.finalize())
            }
        }
    }

    /// Hash a single value
    pub fn hash_value(&self, value: &HashValue<'_>) -> Vec<u8> {
        match value {
            HashValue::Bytes(bytes) => self.hash_bytes(bytes),
            HashValue::Text(text) => self.hash_text(text),
            HashValue::Integer(integer) => self.hash_integer(integer),
            HashValue::Sequence(values) => self.hash(values),
            HashValue::Composite(composite) => self.hash(&composite.elements_to_hash()),
        }
    }

    /// Hash a [`Hashable`] value through its decomposition
    pub fn hash_object(&self, value: &dyn Hashable) -> Vec<u8> {
        self.hash(&value.elements_to_hash())
    }

    /// Digest of raw bytes, truncated to L
    pub fn hash_bytes(&self, bytes: &[u8]) -> Vec<u8> {
        let mut hasher = self.config.digest_algorithm.new_hasher();
        hasher.update(bytes);
        self.truncate(hasher.finalize())
    }

    /// Digest of the canonical encoding of a string
    pub fn hash_text(&self, text: &str) -> Vec<u8> {
        self.hash_bytes(&self.converter.text_to_bytes(text))
    }

    /// Digest of the canonical encoding of an integer
    pub fn hash_integer(&self, integer: &BigUint) -> Vec<u8> {
        self.hash_bytes(&self.converter.integer_to_bytes(integer))
    }

    fn truncate(&self, digest: Box<[u8]>) -> Vec<u8> {
        let mut digest = digest.into_vec();
        digest.truncate(self.config.security_parameter_l);
        digest
    }
}
