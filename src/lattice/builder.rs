// src/lattice/builder.rs
//
// Shift-polynomial lattice for univariate small roots (May's formulation of
// Coppersmith's method).
//
// Row layout, for f monic of degree d and bound X:
//
//   rows 0 .. d*m        (xX)^j * N^(m-i) * f(xX)^i     i in 0..m, j in 0..d
//   rows d*m .. d*m+t    (xX)^i * f(xX)^m               i in 0..t
//
// Row k is a polynomial of degree exactly k with leading coefficient a power
// of X times a power of N, so the matrix is lower triangular with a non-zero
// diagonal. Every row, evaluated at a root r0 of f mod N, is divisible by N^m.

use num::{BigInt, One, Signed, ToPrimitive};
use log::Level;

use crate::core::error::{Result, SmallRootsError};
use crate::core::observer::ProgressObserver;
use crate::lattice::shift_parameters::ShiftParameters;
use crate::matrix::IntegerMatrix;
use crate::polynomial::Polynomial;

/// Builds the D x D shift-polynomial lattice, D = d*m + t.
pub fn build_lattice<O: ProgressObserver>(
    f: &Polynomial,
    modulus: &BigInt,
    shifts: &ShiftParameters,
    bound: &BigInt,
    observer: &O,
) -> Result<IntegerMatrix> {
    let degree = f.degree();
    let dimension = shifts.validate(degree)?;
    if !f.is_monic() {
        return Err(SmallRootsError::NonMonic {
            leading: f.leading_coefficient(),
            reason: "must be 1 before the lattice is built".to_string(),
        });
    }
    if modulus <= &BigInt::one() {
        return Err(SmallRootsError::config(format!("modulus must be greater than 1, got {}", modulus)));
    }
    if !bound.is_positive() {
        return Err(SmallRootsError::config(format!("bound must be positive, got {}", bound)));
    }

    observer.notify(
        Level::Info,
        &format!("Building {}x{} lattice (d = {}, m = {}, t = {})", dimension, dimension, degree, shifts.m, shifts.t),
    );

    let m = shifts.m;
    let scaled = f.scale_variable(bound);
    let mut lattice = IntegerMatrix::square(dimension);

    // powers[i] = f(xX)^i for i in 0..=m
    let mut powers = Vec::with_capacity(m + 1);
    powers.push(Polynomial::one());
    for i in 1..=m {
        let next = Polynomial::multiply(&powers[i - 1], &scaled);
        powers.push(next);
    }

    // bound_powers[j] = X^j for j up to max(d, t)
    let max_shift = degree.max(shifts.t);
    let mut bound_powers = Vec::with_capacity(max_shift + 1);
    bound_powers.push(BigInt::one());
    for j in 1..=max_shift {
        let next = &bound_powers[j - 1] * bound;
        bound_powers.push(next);
    }

    observer.notify(Level::Debug, "Generating normal shifts...");
    let mut row = 0;
    let mut modulus_power = modulus.pow(m as u32);
    for i in 0..m {
        for j in 0..degree {
            let factor = &modulus_power * &bound_powers[j];
            let shift = powers[i].shift(j).scale(&factor);
            write_row(&mut lattice, row, &shift);
            row += 1;
        }
        modulus_power /= modulus;
    }

    observer.notify(Level::Debug, "Generating additional shifts...");
    for i in 0..shifts.t {
        let shift = powers[m].shift(i).scale(&bound_powers[i]);
        write_row(&mut lattice, row, &shift);
        row += 1;
    }

    if observer.is_enabled(Level::Debug) {
        observer.notify(
            Level::Debug,
            &format!("Lattice built, largest entry has {} bits", lattice.max_entry_bits()),
        );
    }
    Ok(lattice)
}

/// Copies the coefficients of `shift` into columns 0..=row; columns past the
/// diagonal are left untouched.
fn write_row(lattice: &mut IntegerMatrix, row: usize, shift: &Polynomial) {
    debug_assert_eq!(shift.degree(), row);
    for term in shift.terms() {
        if term.exponent <= row {
            lattice[(row, term.exponent)] = term.coefficient.clone();
        }
    }
}

/// log2 of the Howgrave-Graham target N^m / sqrt(D) compared against
/// log2 of det(L)^(1/D); positive slack means the heuristic bound is met
/// before accounting for the LLL approximation factor. Diagnostic only.
pub fn heuristic_slack_bits(lattice: &IntegerMatrix, modulus: &BigInt, m: usize) -> f64 {
    let dimension = lattice.num_rows() as f64;
    if dimension == 0.0 {
        return 0.0;
    }
    let determinant_bits: f64 = (0..lattice.num_rows())
        .map(|k| log2_abs(&lattice[(k, k)]))
        .sum();
    let target_bits = m as f64 * log2_abs(modulus) - 0.5 * dimension.log2();
    target_bits - determinant_bits / dimension
}

fn log2_abs(value: &BigInt) -> f64 {
    let magnitude = value.abs();
    let bits = magnitude.bits();
    if bits == 0 {
        return 0.0;
    }
    // Keep the top 53 bits, shift the rest into the exponent
    let shift = bits.saturating_sub(53);
    let top = (magnitude >> shift as usize).to_f64().unwrap_or(f64::MAX);
    top.log2() + shift as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::{NullObserver, RecordingObserver};

    fn poly(coefficients: &[i64]) -> Polynomial {
        Polynomial::from_i64_coefficients(coefficients)
    }

    #[test]
    fn test_linear_example_rows() {
        // f = x - 3, N = 35, m = 2, t = 1, X = 6
        let lattice = build_lattice(
            &poly(&[-3, 1]),
            &BigInt::from(35),
            &ShiftParameters::new(2, 1),
            &BigInt::from(6),
            &NullObserver,
        )
        .unwrap();

        let expected = IntegerMatrix::from_i64_rows(&[
            &[1225, 0, 0],     // N^2
            &[-105, 210, 0],   // N * (6x - 3)
            &[9, -36, 36],     // (6x - 3)^2
        ])
        .unwrap();
        assert_eq!(lattice, expected);
    }

    #[test]
    fn test_quadratic_rows() {
        // f = x^2 + 2x + 5, N = 7, m = 1, t = 2, X = 2
        let lattice = build_lattice(
            &poly(&[5, 2, 1]),
            &BigInt::from(7),
            &ShiftParameters::new(1, 2),
            &BigInt::from(2),
            &NullObserver,
        )
        .unwrap();

        // f(2x) = 4x^2 + 4x + 5
        let expected = IntegerMatrix::from_i64_rows(&[
            &[7, 0, 0, 0],
            &[0, 14, 0, 0],
            &[5, 4, 4, 0],
            &[0, 10, 8, 8],
        ])
        .unwrap();
        assert_eq!(lattice, expected);
    }

    #[test]
    fn test_dimension_and_triangular_shape() {
        let f = poly(&[11, -4, 0, 1]);
        for (m, t) in [(1, 0), (2, 1), (3, 2), (2, 5)] {
            let shifts = ShiftParameters::new(m, t);
            let lattice = build_lattice(&f, &BigInt::from(1009), &shifts, &BigInt::from(3), &NullObserver).unwrap();
            assert_eq!(lattice.num_rows(), 3 * m + t);
            assert_eq!(lattice.num_cols(), 3 * m + t);
            assert!(lattice.is_lower_triangular());
            for k in 0..lattice.num_rows() {
                assert!(lattice[(k, k)].is_positive());
            }
        }
    }

    #[test]
    fn test_rows_vanish_mod_n_power_at_root() {
        // f = x^2 + x + 1 has root 2 mod 7; with X = 1 rows are plain polynomials
        let f = poly(&[1, 1, 1]);
        let modulus = BigInt::from(7);
        let bound = BigInt::from(1);
        let shifts = ShiftParameters::new(3, 2);
        let lattice = build_lattice(&f, &modulus, &shifts, &bound, &NullObserver).unwrap();

        let target = modulus.pow(3);
        for row in lattice.rows() {
            let g = Polynomial::from_coefficients(row.to_vec());
            assert_eq!(g.evaluate(&BigInt::from(2)) % &target, BigInt::from(0));
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let f = poly(&[-3, 1]);
        let n = BigInt::from(35);
        let x = BigInt::from(6);

        let err = build_lattice(&f, &n, &ShiftParameters::new(0, 1), &x, &NullObserver).unwrap_err();
        assert!(matches!(err, SmallRootsError::Config(_)));

        let err = build_lattice(&f, &BigInt::from(1), &ShiftParameters::new(2, 1), &x, &NullObserver).unwrap_err();
        assert!(matches!(err, SmallRootsError::Config(_)));

        let err = build_lattice(&f, &n, &ShiftParameters::new(2, 1), &BigInt::from(0), &NullObserver).unwrap_err();
        assert!(matches!(err, SmallRootsError::Config(_)));

        let err = build_lattice(&poly(&[7]), &n, &ShiftParameters::new(2, 1), &x, &NullObserver).unwrap_err();
        assert!(matches!(err, SmallRootsError::Config(_)));

        let err = build_lattice(&poly(&[-3, 2]), &n, &ShiftParameters::new(2, 1), &x, &NullObserver).unwrap_err();
        assert!(matches!(err, SmallRootsError::NonMonic { .. }));
    }

    #[test]
    fn test_reports_progress() {
        let observer = RecordingObserver::new();
        build_lattice(&poly(&[-3, 1]), &BigInt::from(35), &ShiftParameters::new(2, 1), &BigInt::from(6), &observer)
            .unwrap();
        assert!(observer.contains(Level::Info, "Building 3x3 lattice"));
        assert!(observer.contains(Level::Debug, "Generating normal shifts..."));
        assert!(observer.contains(Level::Debug, "Generating additional shifts..."));
    }

    #[test]
    fn test_heuristic_slack() {
        // Tiny bound, generous shifts: slack must be positive
        let f = poly(&[-3, 1]);
        let modulus = BigInt::from(1_000_003);
        let lattice = build_lattice(&f, &modulus, &ShiftParameters::new(2, 1), &BigInt::from(2), &NullObserver).unwrap();
        assert!(heuristic_slack_bits(&lattice, &modulus, 2) > 0.0);

        // Bound far above N: slack must be negative
        let huge = modulus.pow(3);
        let lattice = build_lattice(&f, &modulus, &ShiftParameters::new(2, 1), &huge, &NullObserver).unwrap();
        assert!(heuristic_slack_bits(&lattice, &modulus, 2) < 0.0);
    }
}
