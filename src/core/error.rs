// src/core/error.rs

use num::BigInt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmallRootsError {
    /// Parameters that cannot describe a lattice (d, m, t, N or X out of range).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The leading coefficient is not a unit in the coefficient ring.
    #[error("cannot make polynomial monic: leading coefficient {leading} {reason}")]
    NonMonic { leading: BigInt, reason: String },

    /// A reduced basis entry is not divisible by the matching power of the bound.
    #[error("inexact reconstruction in row {row}, column {column}")]
    InexactReconstruction { row: usize, column: usize },

    /// Zero or constant candidate polynomial; it contributes no roots.
    #[error("degenerate candidate polynomial of degree {degree}")]
    DegenerateCandidate { degree: usize },

    #[error("lattice reduction failed: {0}")]
    Reduction(String),

    #[error("cannot parse polynomial: {0}")]
    Parse(String),
}

impl SmallRootsError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        SmallRootsError::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SmallRootsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SmallRootsError::InexactReconstruction { row: 2, column: 1 };
        assert_eq!(err.to_string(), "inexact reconstruction in row 2, column 1");

        let err = SmallRootsError::NonMonic {
            leading: BigInt::from(5),
            reason: "is not invertible modulo 35".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot make polynomial monic: leading coefficient 5 is not invertible modulo 35"
        );
    }
}
