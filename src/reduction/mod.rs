// src/reduction/mod.rs
//
// Lattice basis reduction sits behind `LatticeReducer` so the rest of the
// pipeline only depends on the contract: square integer matrix in, basis of
// the same lattice out, size-reduced and satisfying the Lovász condition.

pub mod lll;

use crate::core::error::Result;
use crate::core::observer::ProgressObserver;
use crate::matrix::IntegerMatrix;

pub use lll::{is_lll_reduced, IntegralLll, LllStats};

pub trait LatticeReducer {
    /// Returns a reduced basis of the lattice spanned by the rows of `basis`.
    fn reduce(&self, basis: &IntegerMatrix) -> Result<IntegerMatrix>;

    /// Same as `reduce`, with progress reported to `observer`. Reducers with
    /// nothing to report keep the default.
    fn reduce_reporting(&self, basis: &IntegerMatrix, _observer: &dyn ProgressObserver) -> Result<IntegerMatrix> {
        self.reduce(basis)
    }

    fn name(&self) -> &str {
        "lattice reducer"
    }
}

impl<T: LatticeReducer + ?Sized> LatticeReducer for &T {
    fn reduce(&self, basis: &IntegerMatrix) -> Result<IntegerMatrix> {
        (**self).reduce(basis)
    }

    fn reduce_reporting(&self, basis: &IntegerMatrix, observer: &dyn ProgressObserver) -> Result<IntegerMatrix> {
        (**self).reduce_reporting(basis, observer)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: LatticeReducer + ?Sized> LatticeReducer for Box<T> {
    fn reduce(&self, basis: &IntegerMatrix) -> Result<IntegerMatrix> {
        (**self).reduce(basis)
    }

    fn reduce_reporting(&self, basis: &IntegerMatrix, observer: &dyn ProgressObserver) -> Result<IntegerMatrix> {
        (**self).reduce_reporting(basis, observer)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
