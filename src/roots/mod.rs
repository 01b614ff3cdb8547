// src/roots/mod.rs

pub mod extractor;
pub mod integer_roots;

pub use extractor::{is_small_root, reconstruct_row, satisfies_howgrave_graham, verified_roots, Roots};
pub use integer_roots::{cauchy_bound, integer_roots, SturmSequence};
