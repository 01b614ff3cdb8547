// src/polynomial/normalizer.rs
//
// Brings the target polynomial into monic integer form before any lattice
// is built. Division by the leading coefficient has to be exact in the ring
// the polynomial lives in, otherwise the roots would change.

use num::{BigInt, One, Signed};
use log::Level;

use crate::core::error::{Result, SmallRootsError};
use crate::core::observer::ProgressObserver;
use crate::integer_math::modular::{exact_div, mod_inverse};
use crate::polynomial::polynomial::{Polynomial, Term};

/// Ring in which the leading coefficient is inverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoefficientRing {
    /// Plain integers: every coefficient must be divisible by the leading one.
    Integers,
    /// Integers modulo N: the leading coefficient must be coprime to N and the
    /// result is lifted back to representatives in [0, N).
    Modular(BigInt),
}

impl CoefficientRing {
    pub fn name(&self) -> String {
        match self {
            CoefficientRing::Integers => "ZZ".to_string(),
            CoefficientRing::Modular(modulus) => format!("Z/{}Z", modulus),
        }
    }
}

/// Returns the monic integer polynomial with the same roots as `f` in `ring`.
pub fn normalize<O: ProgressObserver>(f: &Polynomial, ring: &CoefficientRing, observer: &O) -> Result<Polynomial> {
    if f.is_constant() {
        return Err(SmallRootsError::config(format!(
            "polynomial must have degree at least 1, got '{}'",
            f
        )));
    }

    let leading = f.leading_coefficient();
    let monic = match ring {
        CoefficientRing::Integers => {
            if leading.is_one() {
                f.clone()
            } else {
                let mut terms = Vec::with_capacity(f.terms().len());
                for term in f.terms() {
                    let quotient = exact_div(&term.coefficient, &leading).ok_or_else(|| SmallRootsError::NonMonic {
                        leading: leading.clone(),
                        reason: format!("does not divide coefficient {} of x^{}", term.coefficient, term.exponent),
                    })?;
                    terms.push(Term::new(quotient, term.exponent));
                }
                Polynomial::new(terms)
            }
        }
        CoefficientRing::Modular(modulus) => {
            if !modulus.is_positive() || modulus.is_one() {
                return Err(SmallRootsError::config(format!("modulus must be greater than 1, got {}", modulus)));
            }
            let inverse = mod_inverse(&leading, modulus).ok_or_else(|| SmallRootsError::NonMonic {
                leading: leading.clone(),
                reason: format!("is not invertible modulo {}", modulus),
            })?;
            f.scale(&inverse).field_modulus(modulus)
        }
    };

    // Reduction mod N can only drop the degree if the leading term vanished
    if !monic.is_monic() || monic.degree() != f.degree() {
        return Err(SmallRootsError::NonMonic {
            leading,
            reason: format!("does not give a monic polynomial over {}", ring.name()),
        });
    }

    if observer.is_enabled(Level::Debug) {
        observer.notify(Level::Debug, &format!("Normalized polynomial over {}: {}", ring.name(), monic));
    }
    Ok(monic)
}
