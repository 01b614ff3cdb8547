// src/lib.rs

pub mod config;
pub mod core;
pub mod integer_math;
pub mod lattice;
pub mod matrix;
pub mod polynomial;
pub mod reduction;
pub mod roots;

pub use crate::config::SmallRootsConfig;
pub use crate::core::{
    modular_univariate, LogObserver, ModularUnivariate, NullObserver, ProgressObserver, RecordingObserver, Result,
    SmallRootsError, SmallRootsSolver,
};
pub use crate::lattice::{build_lattice, ShiftParameters};
pub use crate::matrix::IntegerMatrix;
pub use crate::polynomial::{normalize, CoefficientRing, Polynomial, Term};
pub use crate::reduction::{IntegralLll, LatticeReducer};
pub use crate::roots::{integer_roots, verified_roots, Roots};
