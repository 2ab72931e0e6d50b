//! Uniform sampling source consumed by key establishment and polynomial generation

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::utils::random_below;

/// Source of uniformly distributed big integers.
///
/// Implementations must be unbiased: every value of the requested range is
/// equally likely. Synchronizing a generator shared between threads is the
/// caller's job; every operation in this crate takes it as `&mut`.
pub trait RandomGenerator {
    /// Uniform element of `Z_q`, i.e. of `[0, q)`.
    fn random_in_zq(&mut self, q: &BigUint) -> BigUint;

    /// Uniform integer in `[0, bound)`.
    fn random_big_integer(&mut self, bound: &BigUint) -> BigUint;
}

impl<R: RngCore + CryptoRng + ?Sized> RandomGenerator for R {
    fn random_in_zq(&mut self, q: &BigUint) -> BigUint {
        random_below(self, q)
    }

    fn random_big_integer(&mut self, bound: &BigUint) -> BigUint {
        random_below(self, bound)
    }
}
