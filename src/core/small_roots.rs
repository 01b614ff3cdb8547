// src/core/small_roots.rs
//
// Pipeline driver: normalize -> build lattice -> reduce -> extract roots.
// Everything up to and including reduction runs eagerly inside `solve`; root
// extraction is lazy and happens while the returned iterator is consumed.

use log::Level;
use num::{BigInt, One, Signed};

use crate::config::SmallRootsConfig;
use crate::core::error::{Result, SmallRootsError};
use crate::core::observer::{LogObserver, ProgressObserver};
use crate::lattice::{build_lattice, heuristic_slack_bits, ShiftParameters};
use crate::polynomial::{normalize, CoefficientRing, Polynomial};
use crate::reduction::{IntegralLll, LatticeReducer};
use crate::roots::{verified_roots, Roots};

/// A univariate small-roots instance: find r with f(r) = 0 mod N and |r| < X.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModularUnivariate {
    pub polynomial: Polynomial,
    /// Ring used to make `polynomial` monic.
    pub ring: CoefficientRing,
    pub modulus: BigInt,
    pub shifts: ShiftParameters,
    pub bound: BigInt,
}

impl ModularUnivariate {
    /// Instance whose leading coefficient is inverted modulo N.
    pub fn new(polynomial: Polynomial, modulus: BigInt, shifts: ShiftParameters, bound: BigInt) -> Self {
        ModularUnivariate {
            polynomial,
            ring: CoefficientRing::Modular(modulus.clone()),
            modulus,
            shifts,
            bound,
        }
    }

    /// Instance with the shift counts taken from the `shifts` section of the configuration.
    pub fn with_config(polynomial: Polynomial, modulus: BigInt, bound: BigInt, config: &SmallRootsConfig) -> Self {
        ModularUnivariate::new(polynomial, modulus, config.shifts, bound)
    }

    /// Requires the leading coefficient to divide the others over the integers instead.
    pub fn over_integers(mut self) -> Self {
        self.ring = CoefficientRing::Integers;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.modulus <= BigInt::one() {
            return Err(SmallRootsError::config(format!(
                "modulus must be greater than 1, got {}",
                self.modulus
            )));
        }
        if !self.bound.is_positive() {
            return Err(SmallRootsError::config(format!("bound must be positive, got {}", self.bound)));
        }
        self.shifts.validate(self.polynomial.degree())?;
        Ok(())
    }
}

/// Owns the reducer and the progress observer for any number of instances.
#[derive(Debug, Clone)]
pub struct SmallRootsSolver<R = IntegralLll, O = LogObserver> {
    reducer: R,
    observer: O,
}

impl SmallRootsSolver<IntegralLll, LogObserver> {
    pub fn new() -> Self {
        SmallRootsSolver {
            reducer: IntegralLll::default(),
            observer: LogObserver,
        }
    }

    /// Reducer tuned from the `reduction` section of the configuration.
    pub fn from_config(config: &SmallRootsConfig) -> Result<Self> {
        let reducer = IntegralLll::new(config.reduction.delta_numerator, config.reduction.delta_denominator)?;
        Ok(SmallRootsSolver {
            reducer,
            observer: LogObserver,
        })
    }
}

impl Default for SmallRootsSolver<IntegralLll, LogObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: LatticeReducer, O: ProgressObserver> SmallRootsSolver<R, O> {
    pub fn with_parts(reducer: R, observer: O) -> Self {
        SmallRootsSolver { reducer, observer }
    }

    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Runs the eager part of the pipeline and returns the lazy root sequence.
    ///
    /// Parameter and normalization errors surface here, before any reduction
    /// work. Rows that cannot be reconstructed exactly are skipped with a
    /// warning while iterating. The sequence may contain duplicates and
    /// integers that are not roots of f modulo N; use `solve_verified` to
    /// filter them.
    pub fn solve(&self, problem: &ModularUnivariate) -> Result<Roots<'_, O>> {
        problem.validate()?;
        let monic = normalize(&problem.polynomial, &problem.ring, &self.observer)?;

        let lattice = build_lattice(&monic, &problem.modulus, &problem.shifts, &problem.bound, &self.observer)?;
        if self.observer.is_enabled(Level::Debug) {
            let slack = heuristic_slack_bits(&lattice, &problem.modulus, problem.shifts.m);
            self.observer
                .notify(Level::Debug, &format!("Heuristic slack: {:.2} bits", slack));
            if slack < 0.0 {
                self.observer.notify(
                    Level::Debug,
                    "Bound exceeds the Howgrave-Graham heuristic, roots may be missed",
                );
            }
        }

        self.observer.notify(Level::Debug, "Executing the LLL algorithm...");
        let reduced = self.reducer.reduce_reporting(&lattice, &self.observer)?;
        if reduced.num_rows() != lattice.num_rows() || reduced.num_cols() != lattice.num_cols() {
            return Err(SmallRootsError::Reduction(format!(
                "{} returned a {}x{} basis for a {}x{} lattice",
                self.reducer.name(),
                reduced.num_rows(),
                reduced.num_cols(),
                lattice.num_rows(),
                lattice.num_cols()
            )));
        }

        self.observer.notify(Level::Debug, "Reconstructing polynomials...");
        let modulus_power = problem.modulus.pow(problem.shifts.m as u32);
        Ok(Roots::new(reduced, problem.bound.clone(), &self.observer).with_modulus_power(modulus_power))
    }

    /// Distinct r with |r| < X and f(r) = 0 mod N, in the order `solve` finds them.
    pub fn solve_verified(&self, problem: &ModularUnivariate) -> Result<Vec<BigInt>> {
        let candidates = self.solve(problem)?;
        let roots = verified_roots(candidates, &problem.polynomial, &problem.modulus, &problem.bound);
        self.observer
            .notify(Level::Info, &format!("Found {} small root(s)", roots.len()));
        Ok(roots)
    }
}

/// Every integer root of the reduced-basis candidates for f mod N with shift
/// counts (m, t) and bound X, using exact LLL with delta = 99/100.
pub fn modular_univariate(
    f: &Polynomial,
    modulus: &BigInt,
    m: usize,
    t: usize,
    bound: &BigInt,
) -> Result<Vec<BigInt>> {
    let problem = ModularUnivariate::new(f.clone(), modulus.clone(), ShiftParameters::new(m, t), bound.clone());
    let solver = SmallRootsSolver::new();
    let roots = solver.solve(&problem)?.collect();
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::{NullObserver, RecordingObserver};
    use crate::matrix::IntegerMatrix;

    fn linear_example() -> ModularUnivariate {
        ModularUnivariate::new(
            Polynomial::from_i64_coefficients(&[-3, 1]),
            BigInt::from(35),
            ShiftParameters::new(2, 1),
            BigInt::from(6),
        )
    }

    #[test]
    fn test_linear_example() {
        let roots = modular_univariate(
            &Polynomial::from_i64_coefficients(&[-3, 1]),
            &BigInt::from(35),
            2,
            1,
            &BigInt::from(6),
        )
        .unwrap();
        assert!(roots.contains(&BigInt::from(3)));

        let solver = SmallRootsSolver::with_parts(IntegralLll::default(), NullObserver);
        assert_eq!(solver.solve_verified(&linear_example()).unwrap(), vec![BigInt::from(3)]);
    }

    #[test]
    fn test_non_monic_input_is_normalized() {
        // 2x - 6 = 2 (x - 3)
        let problem = ModularUnivariate::new(
            Polynomial::from_i64_coefficients(&[-6, 2]),
            BigInt::from(35),
            ShiftParameters::new(2, 1),
            BigInt::from(6),
        );
        let solver = SmallRootsSolver::with_parts(IntegralLll::default(), NullObserver);
        assert_eq!(solver.solve_verified(&problem).unwrap(), vec![BigInt::from(3)]);

        let over_integers = problem.clone().over_integers();
        assert_eq!(solver.solve_verified(&over_integers).unwrap(), vec![BigInt::from(3)]);
    }

    #[test]
    fn test_configuration_errors_fail_fast() {
        let solver = SmallRootsSolver::with_parts(IntegralLll::default(), NullObserver);

        let mut problem = linear_example();
        problem.shifts = ShiftParameters::new(0, 1);
        assert!(matches!(solver.solve(&problem), Err(SmallRootsError::Config(_))));

        let mut problem = linear_example();
        problem.bound = BigInt::from(0);
        assert!(matches!(solver.solve(&problem), Err(SmallRootsError::Config(_))));

        let problem = ModularUnivariate::new(
            Polynomial::from_i64_coefficients(&[-3, 1]),
            BigInt::from(1),
            ShiftParameters::new(2, 1),
            BigInt::from(6),
        );
        assert!(matches!(solver.solve(&problem), Err(SmallRootsError::Config(_))));

        let problem = ModularUnivariate::new(
            Polynomial::from_i64_coefficients(&[-3, 5]),
            BigInt::from(35),
            ShiftParameters::new(2, 1),
            BigInt::from(6),
        );
        assert!(matches!(solver.solve(&problem), Err(SmallRootsError::NonMonic { .. })));
    }

    #[test]
    fn test_progress_messages() {
        let observer = RecordingObserver::new();
        let solver = SmallRootsSolver::with_parts(IntegralLll::default(), &observer);
        solver.solve_verified(&linear_example()).unwrap();

        assert!(observer.contains(Level::Info, "Building 3x3 lattice"));
        assert!(observer.contains(Level::Debug, "Executing the LLL algorithm..."));
        assert!(observer.contains(Level::Debug, "LLL: 3 rows reduced"));
        assert!(observer.contains(Level::Debug, "Reconstructing polynomials..."));
        assert!(observer.contains(Level::Info, "Found 1 small root(s)"));
    }

    struct WrongShape;

    impl LatticeReducer for WrongShape {
        fn reduce(&self, _basis: &IntegerMatrix) -> Result<IntegerMatrix> {
            Ok(IntegerMatrix::square(1))
        }
    }

    #[test]
    fn test_reducer_output_shape_checked() {
        let solver = SmallRootsSolver::with_parts(WrongShape, NullObserver);
        assert!(matches!(solver.solve(&linear_example()), Err(SmallRootsError::Reduction(_))));
    }

    struct Identity;

    impl LatticeReducer for Identity {
        fn reduce(&self, basis: &IntegerMatrix) -> Result<IntegerMatrix> {
            Ok(basis.clone())
        }
    }

    #[test]
    fn test_custom_reducer() {
        // Over the integers the unreduced rows are N^2, N(6x - 3) and (6x - 3)^2;
        // the constant row contributes nothing
        let solver = SmallRootsSolver::with_parts(Identity, NullObserver);
        let problem = linear_example().over_integers();
        let roots: Vec<BigInt> = solver.solve(&problem).unwrap().collect();
        assert_eq!(roots, vec![BigInt::from(3), BigInt::from(3)]);

        // Modulo N the polynomial is lifted to x + 32 first
        let roots: Vec<BigInt> = solver.solve(&linear_example()).unwrap().collect();
        assert_eq!(roots, vec![BigInt::from(-32), BigInt::from(-32)]);
    }

    #[test]
    fn test_from_config() {
        let config = SmallRootsConfig::default();
        let solver = SmallRootsSolver::from_config(&config).unwrap();
        assert_eq!(solver.reducer(), &IntegralLll::default());

        let mut config = SmallRootsConfig::default();
        config.shifts = ShiftParameters::new(3, 2);
        let problem = ModularUnivariate::with_config(
            Polynomial::from_i64_coefficients(&[-3, 1]),
            BigInt::from(35),
            BigInt::from(6),
            &config,
        );
        assert_eq!(problem.shifts, ShiftParameters::new(3, 2));
        let observer = RecordingObserver::new();
        let solver = SmallRootsSolver::with_parts(IntegralLll::default(), &observer);
        assert_eq!(solver.solve_verified(&problem).unwrap(), vec![BigInt::from(3)]);
        assert!(observer.contains(Level::Info, "Building 5x5 lattice (d = 1, m = 3, t = 2)"));

        let mut config = SmallRootsConfig::default();
        config.reduction.delta_numerator = 1;
        config.reduction.delta_denominator = 5;
        assert!(SmallRootsSolver::from_config(&config).is_err());
    }
}
