// src/config/small_roots_config.rs

use serde::{Deserialize, Serialize};
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use std::path::Path;

use crate::lattice::ShiftParameters;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmallRootsConfig {
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Default shift counts used when a caller does not pick its own
    pub shifts: ShiftParameters,

    /// Lattice reduction tuning
    pub reduction: ReductionConfig,
}

/// Lovász parameter delta = numerator / denominator, must lie in (1/4, 1]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionConfig {
    pub delta_numerator: u64,
    pub delta_denominator: u64,
}

impl Default for SmallRootsConfig {
    fn default() -> Self {
        SmallRootsConfig {
            log_level: "info".to_string(),
            shifts: ShiftParameters::default(),
            reduction: ReductionConfig::default(),
        }
    }
}

impl Default for ReductionConfig {
    fn default() -> Self {
        ReductionConfig {
            delta_numerator: 99,
            delta_denominator: 100,
        }
    }
}

impl SmallRootsConfig {
    /// Load configuration with precedence: env vars → config file → defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        // TOML preferred, YAML fallback
        if Path::new("small_roots.toml").exists() {
            builder = builder.add_source(File::with_name("small_roots.toml"));
        } else if Path::new("small_roots.yaml").exists() {
            builder = builder.add_source(File::with_name("small_roots.yaml"));
        }

        Self::finish(builder)
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = SmallRootsConfig::default();
        Config::builder()
            .set_default("log_level", defaults.log_level)?
            .set_default("shifts.m", defaults.shifts.m as u64)?
            .set_default("shifts.t", defaults.shifts.t as u64)?
            .set_default("reduction.delta_numerator", defaults.reduction.delta_numerator)?
            .set_default("reduction.delta_denominator", defaults.reduction.delta_denominator)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        // Double underscore separates sections, e.g. SMALL_ROOTS_SHIFTS__M=4
        let builder = builder.add_source(
            Environment::with_prefix("SMALL_ROOTS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
