// src/lattice/mod.rs

pub mod builder;
pub mod shift_parameters;

pub use builder::{build_lattice, heuristic_slack_bits};
pub use shift_parameters::ShiftParameters;
