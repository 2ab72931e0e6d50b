//! Arithmetic helpers shared by the group, field and sampling code

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{thread_rng, RngCore};

use crate::error::{PrimitiveError, Result};

/// Number of Miller-Rabin rounds used when validating group and field moduli
pub const PRIMALITY_TEST_ROUNDS: usize = 20;

/// Smallest safe prime size accepted by [`generate_safe_prime`]
pub const MIN_SAFE_PRIME_BITS: u64 = 16;

/// Modular exponentiation: base^exp mod modulus
pub fn mod_exp(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Uniform sample from `[0, bound)` by rejection against the bit length of `bound`.
///
/// Candidates of `bound.bits()` random bits are drawn until one falls below
/// `bound`, so every value in range is equally likely. At most half of the
/// draws are rejected on average.
///
/// # Panics
///
/// Panics if `bound` is zero; the range `[0, 0)` is empty.
pub(crate) fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    assert!(!bound.is_zero(), "sampling bound must be positive");

    let bits = bound.bits();
    loop {
        let candidate = rng.gen_biguint(bits);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Generate a safe prime p = 2q + 1 with p of exactly `bit_size` bits
pub fn generate_safe_prime<R: RngCore + ?Sized>(
    bit_size: u64,
    rng: &mut R,
) -> Result<(BigUint, BigUint)> {
    if bit_size < MIN_SAFE_PRIME_BITS {
        return Err(PrimitiveError::InvalidGroup(format!(
            "Safe prime size must be at least {} bits, got {}",
            MIN_SAFE_PRIME_BITS, bit_size
        )));
    }

    let max_iterations = 1_000_000;
    for _ in 0..max_iterations {
        // q has bit_size - 1 bits, odd, with its high bit set
        let mut q = rng.gen_biguint(bit_size - 1);
        q |= BigUint::one();
        q |= BigUint::one() << (bit_size - 2);

        // cheap single round first, most candidates fail here
        if !is_probable_prime(&q, 1) {
            continue;
        }

        let p = &q * 2u32 + 1u32;
        if p.bits() == bit_size
            && is_probable_prime(&p, PRIMALITY_TEST_ROUNDS)
            && is_probable_prime(&q, PRIMALITY_TEST_ROUNDS)
        {
            return Ok((p, q));
        }
    }

    Err(PrimitiveError::InvalidGroup(format!(
        "Failed to generate {}-bit safe prime after {} iterations",
        bit_size, max_iterations
    )))
}

/// Miller-Rabin primality test
pub fn is_probable_prime(n: &BigUint, k: usize) -> bool {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);

    if n <= &BigUint::one() {
        return false;
    }
    if n == &two || n == &three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    let mut rng = thread_rng();
    let n_minus_1 = n - BigUint::one();
    let (s, d) = factor_powers_of_two(&n_minus_1);

    'witness: for _ in 0..k {
        let a = if n_minus_1 <= two {
            two.clone()
        } else {
            rng.gen_biguint_range(&two, &n_minus_1)
        };

        let mut x = mod_exp(&a, &d, n);

        if x.is_one() || x == n_minus_1 {
            continue;
        }

        for _ in 0..s - 1 {
            x = mod_exp(&x, &two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Factor out powers of 2 from n
pub fn factor_powers_of_two(n: &BigUint) -> (u64, BigUint) {
    let mut s = 0;
    let mut d = n.clone();

    while d.is_even() && !d.is_zero() {
        d >>= 1;
        s += 1;
    }

    (s, d)
}
