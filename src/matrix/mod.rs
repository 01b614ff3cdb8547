// src/matrix/mod.rs

pub mod integer_matrix;

pub use integer_matrix::IntegerMatrix;
