// src/integer_math/modular.rs

use num::{BigInt, Integer, One, Signed, Zero};

/// Inverse of `a` modulo `modulus`, in [0, modulus). None when gcd(a, modulus) != 1.
pub fn mod_inverse(a: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    if modulus <= &BigInt::one() {
        return None;
    }

    let reduced = a.mod_floor(modulus);
    let extended = reduced.extended_gcd(modulus);
    if !extended.gcd.is_one() {
        return None;
    }

    Some(extended.x.mod_floor(modulus))
}

/// Nearest integer to numerator / denominator, halves rounded up. `denominator` must be positive.
pub fn round_div(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    debug_assert!(denominator.is_positive());
    let two = BigInt::from(2);
    (numerator * &two + denominator).div_floor(&(denominator * two))
}

/// Exact quotient, or None when `denominator` does not divide `numerator`.
pub fn exact_div(numerator: &BigInt, denominator: &BigInt) -> Option<BigInt> {
    if denominator.is_zero() {
        return None;
    }

    let (quotient, remainder) = numerator.div_rem(denominator);
    if remainder.is_zero() {
        Some(quotient)
    } else {
        None
    }
}

/// Ceiling of numerator / denominator for a positive denominator.
pub fn ceil_div(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    debug_assert!(denominator.is_positive());
    -((-numerator).div_floor(denominator))
}
