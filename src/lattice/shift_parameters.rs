// src/lattice/shift_parameters.rs

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SmallRootsError};

/// Number of normal shifts `m` and extra shifts `t`.
///
/// The lattice built from a degree-d polynomial has dimension d*m + t. The
/// caller chooses m and t so that the Howgrave-Graham/May condition holds for
/// the requested bound; nothing here checks that condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftParameters {
    pub m: usize,
    pub t: usize,
}

impl Default for ShiftParameters {
    fn default() -> Self {
        ShiftParameters { m: 2, t: 1 }
    }
}

impl ShiftParameters {
    pub fn new(m: usize, t: usize) -> Self {
        ShiftParameters { m, t }
    }

    /// Lattice dimension for a polynomial of the given degree.
    pub fn dimension(&self, degree: usize) -> usize {
        degree * self.m + self.t
    }

    /// Checks the shift counts against a polynomial degree and returns the dimension.
    ///
    /// m = 0 is rejected: without a power of N in any row the lattice carries no
    /// information about the modulus. t = 0 is allowed.
    pub fn validate(&self, degree: usize) -> Result<usize> {
        if degree == 0 {
            return Err(SmallRootsError::config("polynomial degree must be at least 1"));
        }
        if self.m == 0 {
            return Err(SmallRootsError::config("number of normal shifts m must be at least 1"));
        }
        if self.m > u32::MAX as usize || self.t > u32::MAX as usize {
            return Err(SmallRootsError::config(format!("shift counts too large: m = {}, t = {}", self.m, self.t)));
        }

        let dimension = degree
            .checked_mul(self.m)
            .and_then(|normal| normal.checked_add(self.t))
            .ok_or_else(|| SmallRootsError::config("lattice dimension overflows usize"))?;
        if dimension == 0 {
            return Err(SmallRootsError::config("lattice dimension must be positive"));
        }
        Ok(dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension() {
        assert_eq!(ShiftParameters::new(2, 1).dimension(1), 3);
        assert_eq!(ShiftParameters::new(3, 0).dimension(2), 6);
        assert_eq!(ShiftParameters::new(4, 5).dimension(3), 17);
    }

    #[test]
    fn test_validate() {
        assert_eq!(ShiftParameters::new(2, 1).validate(1).unwrap(), 3);
        assert_eq!(ShiftParameters::new(1, 0).validate(4).unwrap(), 4);
        assert!(matches!(ShiftParameters::new(0, 3).validate(2), Err(SmallRootsError::Config(_))));
        assert!(matches!(ShiftParameters::new(2, 1).validate(0), Err(SmallRootsError::Config(_))));
        assert!(ShiftParameters::new(usize::MAX, 0).validate(2).is_err());
    }
}
