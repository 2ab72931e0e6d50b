//! Error types for the primitives layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrimitiveError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("Digest algorithm not available: {0}")]
    DigestUnavailable(String),

    #[error(
        "Digest length of {algorithm} is {native} bytes, incompatible with L = {required} bytes ({policy})"
    )]
    DigestLengthMismatch {
        algorithm: &'static str,
        native: usize,
        required: usize,
        policy: &'static str,
    },

    #[error("Invalid security parameter: {0}")]
    InvalidSecurityParameter(String),

    #[error("Invalid encryption group: {0}")]
    InvalidGroup(String),

    #[error("Invalid prime field: {0}")]
    InvalidField(String),

    #[error("Empty list provided for public key combination")]
    EmptyKeyShares,

    #[error("Group mismatch: key share {index} does not belong to the group of the first share")]
    GroupMismatch { index: usize },

    #[error("Invalid election at position {index}: {reason}")]
    InvalidElection { index: usize, reason: String },

    #[error("Prime field too small: {required} distinct non-zero points needed, {available} available")]
    FieldExhausted {
        required: num_bigint::BigUint,
        available: num_bigint::BigUint,
    },
}
