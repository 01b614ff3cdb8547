// src/reduction/lll.rs
//
// Integral LLL (Lenstra-Lenstra-Lovász) reduction.
// Complexity: polynomial in the dimension and the entry bit length
//
// Works entirely over the integers: instead of rational Gram-Schmidt data it
// keeps the Gram determinants d_i and the scaled coefficients
// lambda_ij = d_(j+1) * mu_ij, which stay integral throughout (Cohen,
// "A Course in Computational Algebraic Number Theory", Alg. 2.6.7). Exact,
// deterministic, and slow compared to floating-point variants, which is fine
// for the lattice sizes used in small-root searches.
//
// Index convention: basis rows are 0-based, d has n + 1 entries with d[0] = 1
// and d[i + 1] = prod_{j <= i} |b*_j|^2.

use log::Level;
use num::{BigInt, BigRational, One, Signed, Zero};

use crate::core::error::{Result, SmallRootsError};
use crate::integer_math::modular::round_div;
use crate::core::observer::ProgressObserver;
use crate::matrix::IntegerMatrix;
use crate::reduction::LatticeReducer;

/// Counters from one reduction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LllStats {
    pub swaps: usize,
    pub size_reductions: usize,
}

/// Exact LLL with Lovász parameter delta = numerator / denominator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegralLll {
    delta_numerator: BigInt,
    delta_denominator: BigInt,
}

impl Default for IntegralLll {
    fn default() -> Self {
        IntegralLll {
            delta_numerator: BigInt::from(99),
            delta_denominator: BigInt::from(100),
        }
    }
}

impl IntegralLll {
    /// delta must satisfy 1/4 < delta <= 1.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if denominator == 0 || numerator > denominator || 4 * (numerator as u128) <= denominator as u128 {
            return Err(SmallRootsError::config(format!(
                "LLL delta must lie in (1/4, 1], got {}/{}",
                numerator, denominator
            )));
        }

        Ok(IntegralLll {
            delta_numerator: BigInt::from(numerator),
            delta_denominator: BigInt::from(denominator),
        })
    }

    pub fn delta(&self) -> BigRational {
        BigRational::new(self.delta_numerator.clone(), self.delta_denominator.clone())
    }

    /// Reduces the rows of `basis` and reports how much work it took.
    pub fn reduce_with_stats(&self, basis: &IntegerMatrix) -> Result<(IntegerMatrix, LllStats)> {
        let mut b = basis.to_rows();
        let n = b.len();
        let mut stats = LllStats::default();
        if n == 0 {
            return Ok((basis.clone(), stats));
        }

        let mut d = vec![BigInt::zero(); n + 1];
        d[0] = BigInt::one();
        let mut lambda = vec![vec![BigInt::zero(); n]; n];

        d[1] = dot(&b[0], &b[0]);
        if d[1].is_zero() {
            return Err(SmallRootsError::Reduction("row 0 is the zero vector".to_string()));
        }

        let mut k = 1;
        let mut k_max = 0;
        while k < n {
            if k > k_max {
                k_max = k;
                incremental_gram_schmidt(&b, &mut d, &mut lambda, k)?;
            }

            if size_reduce(&mut b, &mut lambda, &d, k, k - 1) {
                stats.size_reductions += 1;
            }

            if self.lovasz_fails(&d, &lambda, k) {
                swap(&mut b, &mut d, &mut lambda, k, k_max);
                stats.swaps += 1;
                if k > 1 {
                    k -= 1;
                }
            } else {
                for l in (0..k - 1).rev() {
                    if size_reduce(&mut b, &mut lambda, &d, k, l) {
                        stats.size_reductions += 1;
                    }
                }
                k += 1;
            }
        }

        let reduced = IntegerMatrix::from_rows(b)
            .ok_or_else(|| SmallRootsError::Reduction("reduced rows have inconsistent lengths".to_string()))?;
        Ok((reduced, stats))
    }

    /// True when |b*_k|^2 < (delta - mu_(k,k-1)^2) |b*_(k-1)|^2, scaled to integers:
    /// q * d_(k+1) * d_(k-1) < p * d_k^2 - q * lambda_(k,k-1)^2.
    fn lovasz_fails(&self, d: &[BigInt], lambda: &[Vec<BigInt>], k: usize) -> bool {
        let left = &self.delta_denominator * &d[k + 1] * &d[k - 1];
        let l = &lambda[k][k - 1];
        let right = &self.delta_numerator * &d[k] * &d[k] - &self.delta_denominator * l * l;
        left < right
    }
}

impl LatticeReducer for IntegralLll {
    fn reduce(&self, basis: &IntegerMatrix) -> Result<IntegerMatrix> {
        self.reduce_with_stats(basis).map(|(reduced, _)| reduced)
    }

    fn reduce_reporting(&self, basis: &IntegerMatrix, observer: &dyn ProgressObserver) -> Result<IntegerMatrix> {
        let (reduced, stats) = self.reduce_with_stats(basis)?;
        observer.notify(
            Level::Debug,
            &format!(
                "LLL: {} rows reduced with {} swaps and {} size reductions",
                reduced.num_rows(),
                stats.swaps,
                stats.size_reductions
            ),
        );
        Ok(reduced)
    }

    fn name(&self) -> &str {
        "integral LLL"
    }
}

fn dot(a: &[BigInt], b: &[BigInt]) -> BigInt {
    a.iter().zip(b).fold(BigInt::zero(), |acc, (x, y)| acc + x * y)
}

/// Computes lambda[k][0..k] and d[k + 1] for a row seen for the first time.
fn incremental_gram_schmidt(b: &[Vec<BigInt>], d: &mut [BigInt], lambda: &mut [Vec<BigInt>], k: usize) -> Result<()> {
    for j in 0..=k {
        let mut u = dot(&b[k], &b[j]);
        for i in 0..j {
            u = (&d[i + 1] * &u - &lambda[k][i] * &lambda[j][i]) / &d[i];
        }

        if j < k {
            lambda[k][j] = u;
        } else {
            if u.is_zero() {
                return Err(SmallRootsError::Reduction(format!(
                    "row {} is linearly dependent on the rows before it",
                    k
                )));
            }
            d[k + 1] = u;
        }
    }
    Ok(())
}

/// Makes |mu_(k,l)| <= 1/2 by subtracting a multiple of row l from row k.
fn size_reduce(b: &mut [Vec<BigInt>], lambda: &mut [Vec<BigInt>], d: &[BigInt], k: usize, l: usize) -> bool {
    let two_lambda = &lambda[k][l] * 2u32;
    if two_lambda.abs() <= d[l + 1] {
        return false;
    }

    let q = round_div(&lambda[k][l], &d[l + 1]);
    for col in 0..b[k].len() {
        let adjustment = &q * &b[l][col];
        b[k][col] -= adjustment;
    }
    lambda[k][l] -= &q * &d[l + 1];
    for i in 0..l {
        let adjustment = &q * &lambda[l][i];
        lambda[k][i] -= adjustment;
    }
    true
}

/// Exchanges rows k - 1 and k and updates d and lambda in place.
fn swap(b: &mut [Vec<BigInt>], d: &mut [BigInt], lambda: &mut [Vec<BigInt>], k: usize, k_max: usize) {
    b.swap(k, k - 1);
    {
        let (upper, lower) = lambda.split_at_mut(k);
        for j in 0..k - 1 {
            std::mem::swap(&mut upper[k - 1][j], &mut lower[0][j]);
        }
    }

    let l = lambda[k][k - 1].clone();
    let new_d = (&d[k - 1] * &d[k + 1] + &l * &l) / &d[k];

    for i in k + 1..=k_max {
        let t = lambda[i][k].clone();
        let updated_k = (&d[k + 1] * &lambda[i][k - 1] - &l * &t) / &d[k];
        let updated_k_minus_1 = (&new_d * &t + &l * &updated_k) / &d[k + 1];
        lambda[i][k] = updated_k;
        lambda[i][k - 1] = updated_k_minus_1;
    }

    d[k] = new_d;
}

/// Checks size reduction and the Lovász condition with exact rational
/// Gram-Schmidt data. Independent of any reducer, so it can validate one.
pub fn is_lll_reduced(basis: &IntegerMatrix, delta: &BigRational) -> bool {
    let n = basis.num_rows();
    let rows: Vec<Vec<BigRational>> = basis
        .rows()
        .map(|row| row.iter().cloned().map(BigRational::from_integer).collect())
        .collect();

    let mut orthogonal: Vec<Vec<BigRational>> = Vec::with_capacity(n);
    let mut norms: Vec<BigRational> = Vec::with_capacity(n);
    let mut mu = vec![vec![BigRational::zero(); n]; n];
    let half = BigRational::new(BigInt::one(), BigInt::from(2));

    for i in 0..n {
        let mut current = rows[i].clone();
        for j in 0..i {
            if norms[j].is_zero() {
                return false;
            }
            let coefficient = rational_dot(&rows[i], &orthogonal[j]) / &norms[j];
            for (value, o) in current.iter_mut().zip(&orthogonal[j]) {
                *value -= &coefficient * o;
            }
            mu[i][j] = coefficient;
        }
        norms.push(rational_dot(&current, &current));
        orthogonal.push(current);
    }

    for i in 0..n {
        for j in 0..i {
            if mu[i][j].abs() > half {
                return false;
            }
        }
    }

    for k in 1..n {
        let threshold = (delta - &mu[k][k - 1] * &mu[k][k - 1]) * &norms[k - 1];
        if norms[k] < threshold {
            return false;
        }
    }
    true
}

fn rational_dot(a: &[BigRational], b: &[BigRational]) -> BigRational {
    a.iter().zip(b).fold(BigRational::zero(), |acc, (x, y)| acc + x * y)
}
