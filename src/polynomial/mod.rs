// src/polynomial/mod.rs

pub mod normalizer;
pub mod polynomial;
pub mod rational;

pub use normalizer::{normalize, CoefficientRing};
pub use polynomial::{Polynomial, Term};
