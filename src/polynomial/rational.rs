// src/polynomial/rational.rs

use num::{BigInt, BigRational, Integer, One, Signed, Zero};

use crate::polynomial::polynomial::Polynomial;

/// Dense polynomial over the rationals, used where Euclidean division is needed.
/// Coefficients are indexed by exponent with no trailing zeros.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalPolynomial {
    coefficients: Vec<BigRational>,
}

impl RationalPolynomial {
    pub fn new(coefficients: Vec<BigRational>) -> Self {
        let mut polynomial = RationalPolynomial { coefficients };
        polynomial.trim();
        polynomial
    }

    pub fn zero() -> Self {
        RationalPolynomial { coefficients: Vec::new() }
    }

    pub fn from_integer(polynomial: &Polynomial) -> Self {
        if polynomial.is_zero() {
            return RationalPolynomial::zero();
        }
        RationalPolynomial::new(
            polynomial
                .coefficients()
                .into_iter()
                .map(BigRational::from_integer)
                .collect(),
        )
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn leading_coefficient(&self) -> BigRational {
        self.coefficients.last().cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn derivative(&self) -> Self {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(exponent, coefficient)| coefficient * BigRational::from_integer(BigInt::from(exponent)))
            .collect();
        RationalPolynomial::new(coefficients)
    }

    pub fn negate(&self) -> Self {
        RationalPolynomial {
            coefficients: self.coefficients.iter().map(|c| -c).collect(),
        }
    }

    pub fn make_monic(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let leading = self.leading_coefficient();
        RationalPolynomial {
            coefficients: self.coefficients.iter().map(|c| c / &leading).collect(),
        }
    }

    /// Euclidean division; `divisor` must be non-zero.
    pub fn div_rem(&self, divisor: &RationalPolynomial) -> (RationalPolynomial, RationalPolynomial) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");

        let mut remainder = self.coefficients.clone();
        if self.is_zero() || self.degree() < divisor.degree() {
            return (RationalPolynomial::zero(), self.clone());
        }

        let divisor_degree = divisor.degree();
        let divisor_leading = divisor.leading_coefficient();
        let mut quotient = vec![BigRational::zero(); self.degree() - divisor_degree + 1];

        for shift in (0..quotient.len()).rev() {
            let factor = &remainder[shift + divisor_degree] / &divisor_leading;
            if factor.is_zero() {
                continue;
            }
            for (index, coefficient) in divisor.coefficients.iter().enumerate() {
                remainder[shift + index] -= &factor * coefficient;
            }
            quotient[shift] = factor;
        }

        (RationalPolynomial::new(quotient), RationalPolynomial::new(remainder))
    }

    /// Monic greatest common divisor.
    pub fn gcd(&self, other: &RationalPolynomial) -> RationalPolynomial {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, remainder) = a.div_rem(&b);
            a = b;
            b = remainder;
        }
        a.make_monic()
    }

    /// Scales by a positive rational so that every coefficient becomes an
    /// integer with no common factor. Signs at every point are preserved.
    pub fn to_primitive_integer(&self) -> Polynomial {
        if self.is_zero() {
            return Polynomial::zero();
        }

        let denominator_lcm = self
            .coefficients
            .iter()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
        let scaled: Vec<BigInt> = self
            .coefficients
            .iter()
            .map(|c| c.numer() * (&denominator_lcm / c.denom()))
            .collect();
        let content = scaled.iter().fold(BigInt::zero(), |acc, c| acc.gcd(c));

        Polynomial::from_coefficients(scaled.into_iter().map(|c| c / &content).collect())
    }

    fn trim(&mut self) {
        while self.coefficients.last().map_or(false, |c| c.is_zero()) {
            self.coefficients.pop();
        }
    }
}

/// Squarefree part p / gcd(p, p') as a primitive integer polynomial with the
/// sign of the leading coefficient made positive.
pub fn squarefree_part(polynomial: &Polynomial) -> Polynomial {
    let p = RationalPolynomial::from_integer(polynomial);
    if p.is_zero() || p.degree() == 0 {
        return polynomial.clone();
    }

    let g = p.gcd(&p.derivative());
    let part = if g.degree() == 0 { p } else { p.div_rem(&g).0 };
    let part = part.to_primitive_integer();
    if part.leading_coefficient().is_negative() {
        -part
    } else {
        part
    }
}
