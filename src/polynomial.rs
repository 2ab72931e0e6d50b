//! Random polynomials over a prime field and per-candidate secret points
//!
//! Every election gets a fresh random polynomial of degree `k - 2` (`k - 1`
//! coefficients, where `k` is the number of selections). Each candidate is
//! assigned a point on that polynomial at a random non-zero abscissa, and the
//! value at zero is the election's secret.
//!
//! An empty coefficient list is the zero polynomial: it evaluates to 0
//! everywhere, including at zero. Elections with a single selection therefore
//! have a zero image of 0.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::error::{PrimitiveError, Result};
use crate::random::RandomGenerator;
use crate::types::{Election, Point, PointsAndZeroImages, PrimeField};

// Upper bound on up-front allocation for points and used abscissas.
const MAX_PREALLOCATED_POINTS: usize = 1 << 16;

/// Polynomial operations over a fixed [`PrimeField`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    field: PrimeField,
}

impl Polynomial {
    pub fn new(field: PrimeField) -> Self {
        Polynomial { field }
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Draw `d` uniform coefficients `a_0 .. a_{d-1}` in ascending degree
    pub fn gen_polynomial<R: RandomGenerator + ?Sized>(&self, d: usize, rng: &mut R) -> Vec<BigUint> {
        (0..d)
            .map(|_| rng.random_big_integer(&self.field.modulus))
            .collect()
    }

    /// Evaluate the polynomial with the given coefficients at `x`
    pub fn get_y_value(&self, x: &BigUint, coefficients: &[BigUint]) -> BigUint {
        let modulus = &self.field.modulus;

        if x.is_zero() {
            return coefficients
                .first()
                .map(|a_0| a_0 % modulus)
                .unwrap_or_else(BigUint::zero);
        }

        // Horner: y = a_0 + x(a_1 + x(a_2 + ...))
        coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, a_i| (a_i + x * acc) % modulus)
    }

    /// Generate one point per candidate and one zero image per election
    ///
    /// Abscissas are unique across the whole call, not only within one
    /// election.
    ///
    /// # Errors
    ///
    /// - [`PrimitiveError::InvalidElection`] unless `1 <= k <= n` for every election
    /// - [`PrimitiveError::FieldExhausted`] if there are more candidates than
    ///   non-zero field elements
    pub fn gen_points<R: RandomGenerator + ?Sized>(
        &self,
        elections: &[Election],
        rng: &mut R,
    ) -> Result<PointsAndZeroImages> {
        for (index, election) in elections.iter().enumerate() {
            election.validate(index)?;
        }

        let total = elections.iter().fold(BigUint::zero(), |acc, election| {
            acc + election.number_of_candidates
        });
        let available = self.field.non_zero_elements();
        if total > available {
            return Err(PrimitiveError::FieldExhausted {
                required: total,
                available,
            });
        }

        let capacity = total
            .to_usize()
            .map_or(MAX_PREALLOCATED_POINTS, |n| n.min(MAX_PREALLOCATED_POINTS));
        let mut used_xs: HashSet<BigUint> = HashSet::with_capacity(capacity);
        let mut points = Vec::with_capacity(capacity);
        let mut zero_images = Vec::with_capacity(elections.len());

        for (index, election) in elections.iter().enumerate() {
            let coefficients = self.gen_polynomial(election.number_of_selections - 1, rng);

            for _ in 0..election.number_of_candidates {
                let x = self.sample_fresh_x(&used_xs, rng);
                let y = self.get_y_value(&x, &coefficients);
                used_xs.insert(x.clone());
                points.push(Point::new(x, y));
            }

            zero_images.push(self.get_y_value(&BigUint::zero(), &coefficients));

            debug!(
                election = index,
                candidates = election.number_of_candidates,
                selections = election.number_of_selections,
                "generated election points"
            );
        }

        Ok(PointsAndZeroImages::new(points, zero_images))
    }

    fn sample_fresh_x<R: RandomGenerator + ?Sized>(
        &self,
        used_xs: &HashSet<BigUint>,
        rng: &mut R,
    ) -> BigUint {
        loop {
            let x = rng.random_big_integer(&self.field.modulus);
            if !x.is_zero() && !used_xs.contains(&x) {
                return x;
            }
            trace!("rejected abscissa, drawing again");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedRandom;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn polynomial(modulus: u64) -> Polynomial {
        Polynomial::new(PrimeField::new(big(modulus)).unwrap())
    }

    fn direct_evaluation(x: &BigUint, coefficients: &[BigUint], modulus: &BigUint) -> BigUint {
        coefficients
            .iter()
            .enumerate()
            .fold(BigUint::zero(), |acc, (i, a_i)| {
                (acc + a_i * x.modpow(&big(i as u64), modulus)) % modulus
            })
    }

    #[test]
    fn test_known_polynomial() {
        let poly = polynomial(101);
        let coefficients = vec![big(5), big(3), big(2)];

        assert_eq!(poly.get_y_value(&big(0), &coefficients), big(5));
        assert_eq!(poly.get_y_value(&big(4), &coefficients), big(49));
        // 2 * 100 + 3 * 10 + 5 = 235 = 33 mod 101
        assert_eq!(poly.get_y_value(&big(10), &coefficients), big(33));
    }

    #[test]
    fn test_horner_matches_direct_evaluation() {
        // 2^61 - 1
        let poly = polynomial(2_305_843_009_213_693_951);
        let modulus = poly.field().modulus().clone();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let d = rng.gen_range(0..8);
            let coefficients = poly.gen_polynomial(d, &mut rng);
            let x = rng.gen_range(1..u64::MAX);
            let x = big(x);

            assert_eq!(
                poly.get_y_value(&x, &coefficients),
                direct_evaluation(&x, &coefficients, &modulus)
            );
        }
    }

    #[test]
    fn test_zero_returns_constant_term() {
        let poly = polynomial(101);
        let mut rng = StdRng::seed_from_u64(3);

        for d in 1..6 {
            let coefficients = poly.gen_polynomial(d, &mut rng);
            assert_eq!(coefficients.len(), d);
            assert_eq!(poly.get_y_value(&big(0), &coefficients), coefficients[0]);
        }
    }

    #[test]
    fn test_empty_polynomial_is_zero() {
        let poly = polynomial(101);
        let mut rng = StdRng::seed_from_u64(3);

        let coefficients = poly.gen_polynomial(0, &mut rng);
        assert!(coefficients.is_empty());
        assert_eq!(poly.get_y_value(&big(0), &coefficients), big(0));
        assert_eq!(poly.get_y_value(&big(17), &coefficients), big(0));
    }

    #[test]
    fn test_coefficients_are_field_elements() {
        let poly = polynomial(101);
        let mut rng = StdRng::seed_from_u64(8);

        for coefficient in poly.gen_polynomial(500, &mut rng) {
            assert!(coefficient < big(101));
        }
    }

    #[test]
    fn test_gen_points_rejects_zero_and_duplicates() {
        let poly = polynomial(101);
        // a_0 = 7, then x draws: 0 (rejected), 5, 5 (rejected), 9
        let mut rng = ScriptedRandom::new(&[7, 0, 5, 5, 9]);

        let result = poly.gen_points(&[Election::new(2, 2)], &mut rng).unwrap();

        assert_eq!(
            result.points(),
            &[Point::new(big(5), big(7)), Point::new(big(9), big(7))]
        );
        assert_eq!(result.zero_images(), &[big(7)]);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_gen_points_uniqueness_spans_elections() {
        let poly = polynomial(101);
        // election 1: a_0 = 4, x = 3, 8
        // election 2: a = [1, 2], x = 3 and 8 (both used by election 1),
        // 6, 0 (rejected), 10
        let mut rng = ScriptedRandom::new(&[4, 3, 8, 1, 2, 3, 8, 6, 0, 10]);

        let result = poly
            .gen_points(&[Election::new(2, 2), Election::new(2, 3)], &mut rng)
            .unwrap();

        assert_eq!(
            result.points(),
            &[
                Point::new(big(3), big(4)),
                Point::new(big(8), big(4)),
                Point::new(big(6), big(13)),
                Point::new(big(10), big(21)),
            ]
        );
        assert_eq!(result.zero_images(), &[big(4), big(1)]);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_single_selection_election_has_zero_secret() {
        let poly = polynomial(101);
        let mut rng = ScriptedRandom::new(&[12, 40]);

        let result = poly.gen_points(&[Election::new(2, 1)], &mut rng).unwrap();

        assert_eq!(
            result.points(),
            &[Point::new(big(12), big(0)), Point::new(big(40), big(0))]
        );
        assert_eq!(result.zero_images(), &[big(0)]);
    }

    #[test]
    fn test_gen_points_shape() {
        let poly = polynomial(7919);
        let mut rng = StdRng::seed_from_u64(99);
        let elections = [
            Election::new(5, 2),
            Election::new(3, 1),
            Election::new(10, 4),
        ];

        let result = poly.gen_points(&elections, &mut rng).unwrap();

        assert_eq!(result.points().len(), 18);
        assert_eq!(result.zero_images().len(), 3);

        let xs: HashSet<&BigUint> = result.points().iter().map(|point| point.x()).collect();
        assert_eq!(xs.len(), 18);
        assert!(result
            .points()
            .iter()
            .all(|point| !point.x().is_zero() && point.x() < poly.field().modulus()));
    }

    #[test]
    fn test_gen_points_no_elections() {
        let poly = polynomial(101);
        let mut rng = StdRng::seed_from_u64(1);

        let result = poly.gen_points(&[], &mut rng).unwrap();
        assert!(result.points().is_empty());
        assert!(result.zero_images().is_empty());
    }

    #[test]
    fn test_gen_points_validation() {
        let poly = polynomial(101);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            poly.gen_points(&[Election::new(3, 2), Election::new(3, 0)], &mut rng),
            Err(PrimitiveError::InvalidElection { index: 1, .. })
        ));
        assert!(matches!(
            poly.gen_points(&[Election::new(2, 3)], &mut rng),
            Err(PrimitiveError::InvalidElection { index: 0, .. })
        ));
    }

    #[test]
    fn test_gen_points_field_exhaustion() {
        let poly = polynomial(5);
        let mut rng = StdRng::seed_from_u64(1);

        // exactly p' - 1 = 4 candidates still fit
        let result = poly
            .gen_points(&[Election::new(2, 1), Election::new(2, 2)], &mut rng)
            .unwrap();
        assert_eq!(result.points().len(), 4);

        assert_eq!(
            poly.gen_points(&[Election::new(5, 1)], &mut rng),
            Err(PrimitiveError::FieldExhausted {
                required: big(5),
                available: big(4),
            })
        );
    }

    #[test]
    fn test_gen_points_huge_candidate_count_is_an_error() {
        // 2^61 - 1
        let poly = polynomial(2_305_843_009_213_693_951);
        let mut rng = StdRng::seed_from_u64(1);
        let elections = [
            Election::new(usize::MAX, 1),
            Election::new(usize::MAX, 1),
        ];

        let expected = BigUint::from(usize::MAX) * 2u32;
        assert_eq!(
            poly.gen_points(&elections, &mut rng),
            Err(PrimitiveError::FieldExhausted {
                required: expected,
                available: big(2_305_843_009_213_693_950),
            })
        );
    }
}
