//! Canonical byte encoding of hash leaves

use num_bigint::BigUint;

/// Encodes integers and text into the bytes that get hashed.
///
/// Every party deriving the same challenge must use the same converter, so
/// the encoding has to be deterministic and agreed on protocol-wide.
pub trait ByteConverter {
    fn integer_to_bytes(&self, value: &BigUint) -> Vec<u8>;

    fn text_to_bytes(&self, value: &str) -> Vec<u8>;
}

/// Minimal big-endian integers and UTF-8 text.
///
/// Zero is encoded as the single byte `0x00`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanonicalConversion;

impl ByteConverter for CanonicalConversion {
    fn integer_to_bytes(&self, value: &BigUint) -> Vec<u8> {
        value.to_bytes_be()
    }

    fn text_to_bytes(&self, value: &str) -> Vec<u8> {
        value.as_bytes().to_vec()
    }
}
