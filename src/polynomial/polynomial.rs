// src/polynomial/polynomial.rs

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use num::{BigInt, Integer, One, Signed, Zero};

use crate::core::error::SmallRootsError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    pub coefficient: BigInt,
    pub exponent: usize,
}

impl Term {
    pub fn new(coefficient: BigInt, exponent: usize) -> Self {
        Term {
            coefficient,
            exponent,
        }
    }

    /// Parses a single signed term such as `-3*x^2`, `x`, `5x` or `-7`.
    pub fn parse(input: &str) -> Result<Self, SmallRootsError> {
        let (negative, body) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        if body.is_empty() {
            return Err(SmallRootsError::Parse(format!("dangling sign in '{}'", input)));
        }

        let (coefficient, exponent) = match body.find(|c: char| c == 'x' || c == 'X') {
            None => (parse_integer(body, input)?, 0),
            Some(position) => {
                let coefficient_part = body[..position].trim_end_matches('*');
                let coefficient = if coefficient_part.is_empty() {
                    BigInt::one()
                } else {
                    parse_integer(coefficient_part, input)?
                };

                let exponent_part = &body[position + 1..];
                let exponent = if exponent_part.is_empty() {
                    1
                } else if let Some(digits) = exponent_part.strip_prefix('^') {
                    digits
                        .parse::<usize>()
                        .map_err(|_| SmallRootsError::Parse(format!("bad exponent in '{}'", input)))?
                } else {
                    return Err(SmallRootsError::Parse(format!("unexpected '{}' in '{}'", exponent_part, input)));
                };
                (coefficient, exponent)
            }
        };

        let coefficient = if negative { -coefficient } else { coefficient };
        Ok(Term::new(coefficient, exponent))
    }
}

fn parse_integer(text: &str, context: &str) -> Result<BigInt, SmallRootsError> {
    text.parse::<BigInt>()
        .map_err(|_| SmallRootsError::Parse(format!("bad coefficient '{}' in '{}'", text, context)))
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Term) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Term) -> Ordering {
        self.exponent
            .cmp(&other.exponent)
            .then_with(|| self.coefficient.cmp(&other.coefficient))
    }
}

/// Univariate polynomial with integer coefficients.
///
/// Terms are kept sorted by ascending exponent with like terms combined and
/// zero coefficients removed, so the zero polynomial has no terms at all.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Polynomial {
    terms: Vec<Term>,
}

impl Polynomial {
    pub fn new(terms: Vec<Term>) -> Self {
        let mut polynomial = Polynomial { terms };
        polynomial.combine_like_terms();
        polynomial
    }

    /// Builds a polynomial from dense coefficients, index = exponent.
    pub fn from_coefficients(coefficients: Vec<BigInt>) -> Self {
        let terms = coefficients
            .into_iter()
            .enumerate()
            .filter(|(_, coefficient)| !coefficient.is_zero())
            .map(|(exponent, coefficient)| Term::new(coefficient, exponent))
            .collect();
        Polynomial { terms }
    }

    pub fn from_i64_coefficients(coefficients: &[i64]) -> Self {
        Polynomial::from_coefficients(coefficients.iter().map(|&c| BigInt::from(c)).collect())
    }

    pub fn from_roots(roots: &[BigInt]) -> Self {
        roots.iter().fold(Polynomial::one(), |acc, root| {
            acc * Polynomial::new(vec![Term::new(BigInt::one(), 1), Term::new(-root.clone(), 0)])
        })
    }

    pub fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    pub fn one() -> Self {
        Polynomial::constant(BigInt::one())
    }

    pub fn constant(value: BigInt) -> Self {
        Polynomial::monomial(value, 0)
    }

    pub fn monomial(coefficient: BigInt, exponent: usize) -> Self {
        Polynomial::new(vec![Term::new(coefficient, exponent)])
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Degree of the polynomial; the zero polynomial reports 0.
    pub fn degree(&self) -> usize {
        self.terms.last().map_or(0, |term| term.exponent)
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    pub fn is_monic(&self) -> bool {
        self.terms.last().map_or(false, |term| term.coefficient.is_one())
    }

    pub fn coefficient(&self, exponent: usize) -> BigInt {
        self.terms
            .binary_search_by(|term| term.exponent.cmp(&exponent))
            .map(|index| self.terms[index].coefficient.clone())
            .unwrap_or_else(|_| BigInt::zero())
    }

    pub fn leading_coefficient(&self) -> BigInt {
        self.terms
            .last()
            .map_or_else(BigInt::zero, |term| term.coefficient.clone())
    }

    /// Dense coefficient vector of length degree + 1.
    pub fn coefficients(&self) -> Vec<BigInt> {
        let mut dense = vec![BigInt::zero(); self.degree() + 1];
        for term in &self.terms {
            dense[term.exponent] = term.coefficient.clone();
        }
        dense
    }

    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        // Horner over the sparse terms, highest exponent first
        let mut result = BigInt::zero();
        let mut previous_exponent = self.degree();
        for term in self.terms.iter().rev() {
            let gap = previous_exponent - term.exponent;
            if gap > 0 {
                result *= x.pow(gap as u32);
            }
            result += &term.coefficient;
            previous_exponent = term.exponent;
        }
        if previous_exponent > 0 {
            result *= x.pow(previous_exponent as u32);
        }
        result
    }

    pub fn evaluate_mod(&self, x: &BigInt, modulus: &BigInt) -> BigInt {
        let x = x.mod_floor(modulus);
        let mut result = BigInt::zero();
        for coefficient in self.coefficients().iter().rev() {
            result = (result * &x + coefficient).mod_floor(modulus);
        }
        result
    }

    pub fn derivative(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .filter(|term| term.exponent > 0)
            .map(|term| Term::new(&term.coefficient * BigInt::from(term.exponent), term.exponent - 1))
            .collect();
        Polynomial::new(terms)
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale(&self, factor: &BigInt) -> Self {
        self.map_coefficients(|_, coefficient| coefficient * factor)
    }

    /// Substitutes x -> x * bound, i.e. multiplies the coefficient of x^k by bound^k.
    pub fn scale_variable(&self, bound: &BigInt) -> Self {
        let mut power = BigInt::one();
        let mut power_exponent = 0;
        let terms = self
            .terms
            .iter()
            .map(|term| {
                while power_exponent < term.exponent {
                    power *= bound;
                    power_exponent += 1;
                }
                Term::new(&term.coefficient * &power, term.exponent)
            })
            .collect();
        Polynomial::new(terms)
    }

    /// Multiplies by x^amount.
    pub fn shift(&self, amount: usize) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|term| Term::new(term.coefficient.clone(), term.exponent + amount))
            .collect();
        Polynomial { terms }
    }

    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Polynomial::one();
        let mut base = self.clone();
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = Polynomial::multiply(&result, &base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.square();
            }
        }
        result
    }

    pub fn square(&self) -> Self {
        Polynomial::multiply(self, self)
    }

    pub fn multiply(left: &Polynomial, right: &Polynomial) -> Self {
        if left.is_zero() || right.is_zero() {
            return Polynomial::zero();
        }

        let mut coefficients = vec![BigInt::zero(); left.degree() + right.degree() + 1];
        for a in &left.terms {
            for b in &right.terms {
                coefficients[a.exponent + b.exponent] += &a.coefficient * &b.coefficient;
            }
        }
        Polynomial::from_coefficients(coefficients)
    }

    pub fn map_coefficients<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, &BigInt) -> BigInt,
    {
        let terms = self
            .terms
            .iter()
            .map(|term| Term::new(f(term.exponent, &term.coefficient), term.exponent))
            .collect();
        Polynomial::new(terms)
    }

    /// Reduces every coefficient into [0, modulus).
    pub fn field_modulus(&self, modulus: &BigInt) -> Self {
        self.map_coefficients(|_, coefficient| coefficient.mod_floor(modulus))
    }

    pub fn parse(input: &str) -> Result<Self, SmallRootsError> {
        let input: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '−' { '-' } else { c })
            .collect();
        if input.is_empty() {
            return Err(SmallRootsError::Parse("empty input".to_string()));
        }

        let input = input.replace('-', "+-");
        let mut terms = Vec::new();
        for (index, part) in input.split('+').enumerate() {
            if part.is_empty() {
                // A leading sign produces one empty piece; anything else is "a++b"
                if index == 0 {
                    continue;
                }
                return Err(SmallRootsError::Parse(format!("empty term in '{}'", input)));
            }
            terms.push(Term::parse(part)?);
        }

        Ok(Polynomial::new(terms))
    }

    fn combine_like_terms(&mut self) {
        self.terms.sort_by_key(|term| term.exponent);
        let mut combined: Vec<Term> = Vec::with_capacity(self.terms.len());
        for term in self.terms.drain(..) {
            if let Some(last) = combined.last_mut() {
                if last.exponent == term.exponent {
                    last.coefficient += term.coefficient;
                    continue;
                }
            }
            combined.push(term);
        }
        combined.retain(|term| !term.coefficient.is_zero());
        self.terms = combined;
    }
}

impl FromStr for Polynomial {
    type Err = SmallRootsError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Polynomial::parse(input)
    }
}

impl<'a> Add<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn add(self, other: &Polynomial) -> Polynomial {
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Polynomial::new(terms)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, other: Polynomial) -> Polynomial {
        &self + &other
    }
}

impl<'a> Sub<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn sub(self, other: &Polynomial) -> Polynomial {
        self + &(-other)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, other: Polynomial) -> Polynomial {
        &self - &other
    }
}

impl<'a> Mul<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn mul(self, other: &Polynomial) -> Polynomial {
        Polynomial::multiply(self, other)
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, other: Polynomial) -> Polynomial {
        Polynomial::multiply(&self, &other)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        let terms = self
            .terms
            .iter()
            .map(|term| Term::new(-&term.coefficient, term.exponent))
            .collect();
        Polynomial { terms }
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        for (index, term) in self.terms.iter().rev().enumerate() {
            let magnitude = term.coefficient.abs();
            if index == 0 {
                if term.coefficient.is_negative() {
                    write!(f, "-")?;
                }
            } else if term.coefficient.is_negative() {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }

            match (term.exponent, magnitude.is_one()) {
                (0, _) => write!(f, "{}", magnitude)?,
                (1, true) => write!(f, "x")?,
                (1, false) => write!(f, "{}*x", magnitude)?,
                (e, true) => write!(f, "x^{}", e)?,
                (e, false) => write!(f, "{}*x^{}", magnitude, e)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coefficients: &[i64]) -> Polynomial {
        Polynomial::from_i64_coefficients(coefficients)
    }

    #[test]
    fn test_new_combines_and_sorts() {
        let p = Polynomial::new(vec![
            Term::new(BigInt::from(2), 3),
            Term::new(BigInt::from(1), 0),
            Term::new(BigInt::from(-2), 3),
            Term::new(BigInt::from(4), 1),
            Term::new(BigInt::from(1), 1),
        ]);
        assert_eq!(p, poly(&[1, 5]));
        assert_eq!(p.degree(), 1);
    }

    #[test]
    fn test_zero_polynomial() {
        let z = Polynomial::zero();
        assert!(z.is_zero());
        assert!(z.is_constant());
        assert_eq!(z.degree(), 0);
        assert_eq!(z.leading_coefficient(), BigInt::zero());
        assert_eq!(z.coefficients(), vec![BigInt::zero()]);
        assert_eq!(&poly(&[1, 2]) - &poly(&[1, 2]), z);
    }

    #[test]
    fn test_evaluate() {
        // x^3 - 2x + 7
        let p = poly(&[7, -2, 0, 1]);
        assert_eq!(p.evaluate(&BigInt::from(0)), BigInt::from(7));
        assert_eq!(p.evaluate(&BigInt::from(2)), BigInt::from(11));
        assert_eq!(p.evaluate(&BigInt::from(-3)), BigInt::from(-14));
        // x^4 has no constant term
        assert_eq!(poly(&[0, 0, 0, 0, 1]).evaluate(&BigInt::from(3)), BigInt::from(81));
    }

    #[test]
    fn test_evaluate_mod() {
        let p = poly(&[-3, 1]);
        assert_eq!(p.evaluate_mod(&BigInt::from(3), &BigInt::from(35)), BigInt::zero());
        assert_eq!(p.evaluate_mod(&BigInt::from(38), &BigInt::from(35)), BigInt::zero());
        assert_eq!(p.evaluate_mod(&BigInt::from(1), &BigInt::from(35)), BigInt::from(33));
    }

    #[test]
    fn test_derivative() {
        assert_eq!(poly(&[7, -2, 0, 1]).derivative(), poly(&[-2, 0, 3]));
        assert!(poly(&[7]).derivative().is_zero());
    }

    #[test]
    fn test_scale_variable() {
        // f(x) = x^2 - 3x + 5, f(6x) = 36x^2 - 18x + 5
        let p = poly(&[5, -3, 1]);
        assert_eq!(p.scale_variable(&BigInt::from(6)), poly(&[5, -18, 36]));
        assert_eq!(p.scale_variable(&BigInt::one()), p);
    }

    #[test]
    fn test_shift_and_pow() {
        let f = poly(&[-3, 1]);
        assert_eq!(f.shift(2), poly(&[0, 0, -3, 1]));
        assert_eq!(f.pow(0), Polynomial::one());
        assert_eq!(f.pow(2), poly(&[9, -6, 1]));
        assert_eq!(f.pow(3), poly(&[-27, 27, -9, 1]));
    }

    #[test]
    fn test_from_roots() {
        let p = Polynomial::from_roots(&[BigInt::from(2), BigInt::from(-5)]);
        assert_eq!(p, poly(&[-10, 3, 1]));
        assert!(p.is_monic());
    }

    #[test]
    fn test_field_modulus() {
        assert_eq!(poly(&[-3, 1]).field_modulus(&BigInt::from(35)), poly(&[32, 1]));
        assert_eq!(poly(&[35, 70]).field_modulus(&BigInt::from(35)), Polynomial::zero());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Polynomial::parse("x^2 + 3*x - 7").unwrap(), poly(&[-7, 3, 1]));
        assert_eq!(Polynomial::parse("-x + 4").unwrap(), poly(&[4, -1]));
        assert_eq!(Polynomial::parse("5X^3 - X").unwrap(), poly(&[0, -1, 0, 5]));
        assert_eq!("x - 3".parse::<Polynomial>().unwrap(), poly(&[-3, 1]));
        assert_eq!(Polynomial::parse("x − 3").unwrap(), poly(&[-3, 1]));
        assert_eq!(
            Polynomial::parse("x + 123456789012345678901234567890").unwrap().coefficient(0),
            "123456789012345678901234567890".parse::<BigInt>().unwrap()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Polynomial::parse("").is_err());
        assert!(Polynomial::parse("x^").is_err());
        assert!(Polynomial::parse("x ++ 1").is_err());
        assert!(Polynomial::parse("3*y").is_err());
        assert!(Polynomial::parse("x - ").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let p = poly(&[-7, 3, 0, -1, 1]);
        assert_eq!(p.to_string(), "x^4 - x^3 + 3*x - 7");
        assert_eq!(Polynomial::parse(&p.to_string()).unwrap(), p);
        assert_eq!(poly(&[0, -2]).to_string(), "-2*x");
        assert_eq!(Polynomial::zero().to_string(), "0");
    }
}
