//! Algebraic data model: encryption group, prime field, points and elections

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PrimitiveError, Result};
use crate::hash::{HashValue, Hashable};
use crate::utils::{generate_safe_prime, is_probable_prime, mod_exp, PRIMALITY_TEST_ROUNDS};

/// Prime-order subgroup of `Z_p^*` generated by `g`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncryptionGroup {
    pub(crate) p: BigUint, // Prime modulus
    pub(crate) q: BigUint, // Prime order of the subgroup, q | p - 1
    pub(crate) g: BigUint, // Generator of the order-q subgroup
}

impl EncryptionGroup {
    /// Create a new encryption group, checking its invariants
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        let group = EncryptionGroup { p, q, g };
        group.validate()?;
        Ok(group)
    }

    /// Generate a group over a fresh safe prime p = 2q + 1, with g = 4.
    ///
    /// Any square other than 1 generates the order-q subgroup of a safe prime
    /// group, and 4 = 2^2 is the smallest.
    pub fn generate<R: RngCore + ?Sized>(bit_size: u64, rng: &mut R) -> Result<Self> {
        let (p, q) = generate_safe_prime(bit_size, rng)?;
        Self::new(p, q, BigUint::from(4u32))
    }

    /// Get the prime modulus
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Get the subgroup order
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Get the generator
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Get the bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.p.bits()
    }

    /// Whether `x` lies in the order-q subgroup
    pub fn is_member(&self, x: &BigUint) -> bool {
        !x.is_zero() && x < &self.p && mod_exp(x, &self.q, &self.p).is_one()
    }

    /// Validate the group parameters
    pub fn validate(&self) -> Result<()> {
        if self.q.is_zero() {
            return Err(PrimitiveError::InvalidGroup(
                "Subgroup order q must be positive".to_string(),
            ));
        }

        if self.p <= BigUint::from(2u32) {
            return Err(PrimitiveError::InvalidGroup(
                "Modulus p must be > 2".to_string(),
            ));
        }

        if !((&self.p - 1u32) % &self.q).is_zero() {
            return Err(PrimitiveError::InvalidGroup(
                "Subgroup order q must divide p - 1".to_string(),
            ));
        }

        if self.g <= BigUint::one() || self.g >= self.p {
            return Err(PrimitiveError::InvalidGroup(
                "Generator g must be in range (1, p)".to_string(),
            ));
        }

        if !mod_exp(&self.g, &self.q, &self.p).is_one() {
            return Err(PrimitiveError::InvalidGroup(
                "Generator g must satisfy g^q = 1 mod p".to_string(),
            ));
        }

        if !is_probable_prime(&self.p, PRIMALITY_TEST_ROUNDS) {
            return Err(PrimitiveError::InvalidGroup(
                "Modulus p is not prime".to_string(),
            ));
        }

        if !is_probable_prime(&self.q, PRIMALITY_TEST_ROUNDS) {
            return Err(PrimitiveError::InvalidGroup(
                "Subgroup order q is not prime".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for EncryptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EncryptionGroup(p: {} bits, q: {} bits)",
            self.bit_size(),
            self.q.bits()
        )
    }
}

impl Hashable for EncryptionGroup {
    fn elements_to_hash(&self) -> Vec<HashValue<'_>> {
        vec![(&self.p).into(), (&self.q).into(), (&self.g).into()]
    }
}

/// Prime field used for polynomial coefficients and evaluation.
///
/// Kept as its own type so field arithmetic is never mixed up with the
/// arithmetic of an [`EncryptionGroup`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrimeField {
    pub(crate) modulus: BigUint,
}

impl PrimeField {
    /// Create a new prime field, checking that the modulus is a prime > 2
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus <= BigUint::from(2u32) {
            return Err(PrimitiveError::InvalidField(
                "Modulus must be > 2".to_string(),
            ));
        }

        if !is_probable_prime(&modulus, PRIMALITY_TEST_ROUNDS) {
            return Err(PrimitiveError::InvalidField(format!(
                "Modulus {} is not prime",
                modulus
            )));
        }

        Ok(PrimeField { modulus })
    }

    /// Get the field modulus p'
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of distinct non-zero field elements, p' - 1
    pub fn non_zero_elements(&self) -> BigUint {
        &self.modulus - 1u32
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimeField({} bits)", self.modulus.bits())
    }
}

/// Point on a polynomial over a [`PrimeField`]; `x` is never zero
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub(crate) x: BigUint,
    pub(crate) y: BigUint,
}

impl Point {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Point { x, y }
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Hashable for Point {
    fn elements_to_hash(&self) -> Vec<HashValue<'_>> {
        vec![(&self.x).into(), (&self.y).into()]
    }
}

/// Shape of a single election: `n` candidates, `k` of which may be selected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Election {
    pub(crate) number_of_candidates: usize,
    pub(crate) number_of_selections: usize,
}

impl Election {
    pub fn new(number_of_candidates: usize, number_of_selections: usize) -> Self {
        Election {
            number_of_candidates,
            number_of_selections,
        }
    }

    /// Get the number of candidates n
    pub fn number_of_candidates(&self) -> usize {
        self.number_of_candidates
    }

    /// Get the number of selections k
    pub fn number_of_selections(&self) -> usize {
        self.number_of_selections
    }

    /// Check `1 <= k <= n`; `index` is the election's position, used in the error
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.number_of_selections == 0 {
            return Err(PrimitiveError::InvalidElection {
                index,
                reason: "number of selections must be at least 1".to_string(),
            });
        }

        if self.number_of_selections > self.number_of_candidates {
            return Err(PrimitiveError::InvalidElection {
                index,
                reason: format!(
                    "number of selections {} exceeds number of candidates {}",
                    self.number_of_selections, self.number_of_candidates
                ),
            });
        }

        Ok(())
    }
}

impl Hashable for Election {
    fn elements_to_hash(&self) -> Vec<HashValue<'_>> {
        vec![
            self.number_of_candidates.into(),
            self.number_of_selections.into(),
        ]
    }
}

/// Points generated for a list of elections, with one zero image per election
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointsAndZeroImages {
    pub(crate) points: Vec<Point>,
    pub(crate) zero_images: Vec<BigUint>,
}

impl PointsAndZeroImages {
    pub fn new(points: Vec<Point>, zero_images: Vec<BigUint>) -> Self {
        PointsAndZeroImages {
            points,
            zero_images,
        }
    }

    /// Points in election order, then candidate order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Value of each election's polynomial at zero, in election order
    pub fn zero_images(&self) -> &[BigUint] {
        &self.zero_images
    }

    pub fn into_parts(self) -> (Vec<Point>, Vec<BigUint>) {
        (self.points, self.zero_images)
    }
}
