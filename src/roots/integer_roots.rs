// src/roots/integer_roots.rs
//
// Exact integer roots of an integer polynomial.
//
// Strategy:
//   1. Split off the x^k factor (root 0).
//   2. Replace the rest by its squarefree part, so every real root is simple.
//   3. Build a Sturm sequence; V(a) - V(b) counts the distinct real roots in (a, b].
//   4. Bisect the integer interval (-B - 1, B], B a Cauchy bound, keeping only
//      halves that contain roots, until each interval is (k - 1, k]; then k is
//      a root exactly when p(k) = 0.
//
// No floating point and no factoring of the constant term, so coefficient size
// only affects the depth of the bisection (about log2 B levels).

use num::{BigInt, Integer, One, Signed, Zero};

use crate::core::error::{Result, SmallRootsError};
use crate::integer_math::modular::ceil_div;
use crate::polynomial::polynomial::{Polynomial, Term};
use crate::polynomial::rational::{squarefree_part, RationalPolynomial};

/// Distinct integer roots in ascending order.
///
/// Zero and constant polynomials have no meaningful root set and produce
/// `DegenerateCandidate`.
pub fn integer_roots(polynomial: &Polynomial) -> Result<Vec<BigInt>> {
    if polynomial.is_constant() {
        return Err(SmallRootsError::DegenerateCandidate { degree: 0 });
    }

    let mut roots = Vec::new();
    let lowest = polynomial.terms()[0].exponent;
    let remaining = if lowest > 0 {
        roots.push(BigInt::zero());
        Polynomial::new(
            polynomial
                .terms()
                .iter()
                .map(|term| Term::new(term.coefficient.clone(), term.exponent - lowest))
                .collect(),
        )
    } else {
        polynomial.clone()
    };

    if !remaining.is_constant() {
        let squarefree = squarefree_part(&remaining);
        let sturm = SturmSequence::new(&squarefree);
        let bound = cauchy_bound(&squarefree);
        sturm.isolate_integer_roots(&squarefree, -&bound - BigInt::one(), bound, &mut roots);
    }

    roots.sort();
    Ok(roots)
}

/// 1 + ceil(max |a_i| / |a_n|): every complex root has absolute value at most this.
pub fn cauchy_bound(polynomial: &Polynomial) -> BigInt {
    let leading = polynomial.leading_coefficient().abs();
    let degree = polynomial.degree();
    let largest = polynomial
        .terms()
        .iter()
        .filter(|term| term.exponent < degree)
        .map(|term| term.coefficient.abs())
        .max()
        .unwrap_or_else(BigInt::zero);
    BigInt::one() + ceil_div(&largest, &leading)
}

/// Sturm sequence stored as primitive integer polynomials. Each member is a
/// positive multiple of the classical one, so sign patterns are identical.
#[derive(Debug, Clone)]
pub struct SturmSequence {
    chain: Vec<Polynomial>,
}

impl SturmSequence {
    /// `polynomial` should be squarefree for the root count to be exact.
    pub fn new(polynomial: &Polynomial) -> Self {
        let mut chain = Vec::new();
        let mut previous = RationalPolynomial::from_integer(polynomial);
        let mut current = previous.derivative();
        chain.push(previous.to_primitive_integer());

        while !current.is_zero() {
            chain.push(current.to_primitive_integer());
            let (_, remainder) = previous.div_rem(&current);
            previous = current;
            current = remainder.negate();
        }

        SturmSequence { chain }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Number of sign changes in the sequence evaluated at `x`, zeros skipped.
    pub fn sign_variations(&self, x: &BigInt) -> usize {
        let mut variations = 0;
        let mut last_sign = 0i8;
        for member in &self.chain {
            let value = member.evaluate(x);
            let sign = if value.is_positive() {
                1
            } else if value.is_negative() {
                -1
            } else {
                continue;
            };
            if last_sign != 0 && sign != last_sign {
                variations += 1;
            }
            last_sign = sign;
        }
        variations
    }

    /// Distinct real roots in the half-open interval (low, high].
    pub fn count_roots(&self, low: &BigInt, high: &BigInt) -> usize {
        self.sign_variations(low).saturating_sub(self.sign_variations(high))
    }

    fn isolate_integer_roots(&self, polynomial: &Polynomial, low: BigInt, high: BigInt, roots: &mut Vec<BigInt>) {
        let low_variations = self.sign_variations(&low);
        let high_variations = self.sign_variations(&high);
        let mut pending = vec![(low, high, low_variations, high_variations)];

        while let Some((low, high, low_variations, high_variations)) = pending.pop() {
            if low_variations <= high_variations {
                continue;
            }

            if &high - &low == BigInt::one() {
                if polynomial.evaluate(&high).is_zero() {
                    roots.push(high);
                }
                continue;
            }

            let middle = (&low + &high).div_floor(&BigInt::from(2));
            let middle_variations = self.sign_variations(&middle);
            pending.push((middle.clone(), high, middle_variations, high_variations));
            pending.push((low, middle, low_variations, middle_variations));
        }
    }
}
