//! Configuration of the recursive hash

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PrimitiveError, Result};
use crate::hash::DigestAlgorithm;

/// How the native digest length must relate to the security parameter L
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LengthPolicy {
    /// Native output of at least L bytes, truncated to L
    AtLeast,
    /// Native output of exactly L bytes
    Exact,
}

impl fmt::Display for LengthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LengthPolicy {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            LengthPolicy::AtLeast => "at least L",
            LengthPolicy::Exact => "exactly L",
        }
    }
}

/// Configuration for [`RecursiveHash`](crate::hash::RecursiveHash)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HashConfig {
    /// Underlying digest primitive
    pub digest_algorithm: DigestAlgorithm,
    /// Output length L of every digest, in bytes
    pub security_parameter_l: usize,
    /// Accepted relation between the native digest length and L
    pub length_policy: LengthPolicy,
}

impl Default for HashConfig {
    fn default() -> Self {
        HashConfig {
            digest_algorithm: DigestAlgorithm::Sha256,
            security_parameter_l: 32,
            length_policy: LengthPolicy::AtLeast,
        }
    }
}

impl HashConfig {
    pub fn new(digest_algorithm: DigestAlgorithm, security_parameter_l: usize) -> Self {
        HashConfig {
            digest_algorithm,
            security_parameter_l,
            length_policy: LengthPolicy::AtLeast,
        }
    }

    pub fn with_length_policy(mut self, length_policy: LengthPolicy) -> Self {
        self.length_policy = length_policy;
        self
    }

    /// Check that the digest algorithm can produce L-byte outputs
    pub fn validate(&self) -> Result<()> {
        if self.security_parameter_l == 0 {
            return Err(PrimitiveError::InvalidSecurityParameter(
                "L must be at least one byte".to_string(),
            ));
        }

        let native = self.digest_algorithm.output_len();
        let compatible = match self.length_policy {
            LengthPolicy::AtLeast => native >= self.security_parameter_l,
            LengthPolicy::Exact => native == self.security_parameter_l,
        };

        if !compatible {
            return Err(PrimitiveError::DigestLengthMismatch {
                algorithm: self.digest_algorithm.identifier(),
                native,
                required: self.security_parameter_l,
                policy: self.length_policy.as_str(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HashConfig::default();
        assert_eq!(config.digest_algorithm, DigestAlgorithm::Sha256);
        assert_eq!(config.security_parameter_l, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_shorter_digest_is_rejected() {
        let config = HashConfig::new(DigestAlgorithm::Sha256, 48);
        assert_eq!(
            config.validate(),
            Err(PrimitiveError::DigestLengthMismatch {
                algorithm: "SHA-256",
                native: 32,
                required: 48,
                policy: "at least L",
            })
        );
    }

    #[test]
    fn test_exact_policy() {
        let longer = HashConfig::new(DigestAlgorithm::Sha512, 32);
        assert!(longer.validate().is_ok());
        assert!(longer
            .with_length_policy(LengthPolicy::Exact)
            .validate()
            .is_err());

        let exact = HashConfig::new(DigestAlgorithm::Blake2b512, 64)
            .with_length_policy(LengthPolicy::Exact);
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_zero_length_is_rejected() {
        let config = HashConfig::new(DigestAlgorithm::Sha256, 0);
        assert!(matches!(
            config.validate(),
            Err(PrimitiveError::InvalidSecurityParameter(_))
        ));
    }
}
