// src/config/mod.rs

pub mod small_roots_config;

// Re-export main types for convenience
pub use small_roots_config::{ReductionConfig, SmallRootsConfig};
