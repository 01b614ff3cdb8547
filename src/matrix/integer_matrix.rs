// src/matrix/integer_matrix.rs

use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};
use num::{BigInt, Zero};

/// Dense matrix of arbitrary-precision integers stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerMatrix {
    data: Vec<BigInt>,
    num_rows: usize,
    num_cols: usize,
}

impl IntegerMatrix {
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        IntegerMatrix {
            data: vec![BigInt::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    pub fn square(dimension: usize) -> Self {
        IntegerMatrix::zeros(dimension, dimension)
    }

    /// Builds a matrix from rows of equal length. Returns None for ragged input.
    pub fn from_rows(rows: Vec<Vec<BigInt>>) -> Option<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| row.len() != num_cols) {
            return None;
        }

        Some(IntegerMatrix {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        })
    }

    pub fn from_i64_rows(rows: &[&[i64]]) -> Option<Self> {
        IntegerMatrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&value| BigInt::from(value)).collect())
                .collect(),
        )
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    pub fn row(&self, index: usize) -> &[BigInt] {
        let start = index * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[BigInt]> + '_ {
        (0..self.num_rows).map(move |index| self.row(index))
    }

    pub fn to_rows(&self) -> Vec<Vec<BigInt>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.num_cols {
            self.data.swap(a * self.num_cols + col, b * self.num_cols + col);
        }
    }

    /// True when every entry strictly right of the diagonal is zero.
    pub fn is_lower_triangular(&self) -> bool {
        (0..self.num_rows).all(|row| {
            self.row(row)
                .iter()
                .skip(row + 1)
                .all(|entry| entry.is_zero())
        })
    }

    /// Product of the diagonal; equals the determinant for triangular matrices.
    pub fn diagonal_product(&self) -> BigInt {
        (0..self.num_rows.min(self.num_cols)).fold(BigInt::from(1), |acc, i| acc * &self[(i, i)])
    }

    /// Exact determinant by fraction-free Gaussian elimination (Bareiss).
    pub fn determinant(&self) -> Option<BigInt> {
        if !self.is_square() {
            return None;
        }
        let n = self.num_rows;
        if n == 0 {
            return Some(BigInt::from(1));
        }

        let mut m = self.clone();
        let mut sign = BigInt::from(1);
        let mut previous_pivot = BigInt::from(1);

        for k in 0..n - 1 {
            if m[(k, k)].is_zero() {
                match (k + 1..n).find(|&row| !m[(row, k)].is_zero()) {
                    Some(row) => {
                        m.swap_rows(k, row);
                        sign = -sign;
                    }
                    None => return Some(BigInt::zero()),
                }
            }
            for i in k + 1..n {
                for j in k + 1..n {
                    let value = (&m[(i, j)] * &m[(k, k)] - &m[(i, k)] * &m[(k, j)]) / &previous_pivot;
                    m[(i, j)] = value;
                }
                m[(i, k)] = BigInt::zero();
            }
            previous_pivot = m[(k, k)].clone();
        }

        Some(sign * &m[(n - 1, n - 1)])
    }

    /// Largest bit length over all entries.
    pub fn max_entry_bits(&self) -> u64 {
        self.data.iter().map(|entry| entry.bits()).max().unwrap_or(0)
    }
}

impl Index<(usize, usize)> for IntegerMatrix {
    type Output = BigInt;

    fn index(&self, (row, col): (usize, usize)) -> &BigInt {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for IntegerMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut BigInt {
        &mut self.data[row * self.num_cols + col]
    }
}

impl Display for IntegerMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let entries: Vec<String> = row.iter().map(|entry| entry.to_string()).collect();
            writeln!(f, "[{}]", entries.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_index() {
        let m = IntegerMatrix::from_i64_rows(&[&[1, 2], &[3, 4]]).unwrap();
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.num_cols(), 2);
        assert_eq!(m[(1, 0)], BigInt::from(3));
        assert_eq!(m.row(0), &[BigInt::from(1), BigInt::from(2)]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(IntegerMatrix::from_i64_rows(&[&[1, 2], &[3]]).is_none());
    }

    #[test]
    fn test_swap_rows() {
        let mut m = IntegerMatrix::from_i64_rows(&[&[1, 2], &[3, 4]]).unwrap();
        m.swap_rows(0, 1);
        assert_eq!(m, IntegerMatrix::from_i64_rows(&[&[3, 4], &[1, 2]]).unwrap());
    }

    #[test]
    fn test_lower_triangular() {
        let lower = IntegerMatrix::from_i64_rows(&[&[5, 0, 0], &[1, 2, 0], &[7, 8, 9]]).unwrap();
        assert!(lower.is_lower_triangular());
        assert_eq!(lower.diagonal_product(), BigInt::from(90));

        let full = IntegerMatrix::from_i64_rows(&[&[5, 1], &[1, 2]]).unwrap();
        assert!(!full.is_lower_triangular());
    }

    #[test]
    fn test_determinant() {
        let m = IntegerMatrix::from_i64_rows(&[&[2, -1, 0], &[1, 3, 2], &[0, 1, 4]]).unwrap();
        // 2*(12-2) + 1*(4-0) = 24
        assert_eq!(m.determinant(), Some(BigInt::from(24)));

        let needs_pivot = IntegerMatrix::from_i64_rows(&[&[0, 1], &[1, 0]]).unwrap();
        assert_eq!(needs_pivot.determinant(), Some(BigInt::from(-1)));

        let singular = IntegerMatrix::from_i64_rows(&[&[1, 2], &[2, 4]]).unwrap();
        assert_eq!(singular.determinant(), Some(BigInt::zero()));

        assert_eq!(IntegerMatrix::zeros(2, 3).determinant(), None);
    }
}
