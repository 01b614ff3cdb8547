// src/roots/extractor.rs

use std::collections::{HashSet, VecDeque};

use log::Level;
use num::{BigInt, Signed, Zero};

use crate::core::error::{Result, SmallRootsError};
use crate::core::observer::ProgressObserver;
use crate::integer_math::modular::exact_div;
use crate::matrix::IntegerMatrix;
use crate::polynomial::Polynomial;
use crate::roots::integer_roots::integer_roots;

/// Undoes the bound scaling of a reduced row: the entry in column `col` is
/// divided by X^col. Any non-exact division rejects the whole row.
pub fn reconstruct_row(row_index: usize, row: &[BigInt], bound: &BigInt) -> Result<Polynomial> {
    let mut coefficients = Vec::with_capacity(row.len());
    let mut bound_power = BigInt::from(1);
    for (column, entry) in row.iter().enumerate() {
        let coefficient = exact_div(entry, &bound_power)
            .ok_or(SmallRootsError::InexactReconstruction { row: row_index, column })?;
        coefficients.push(coefficient);
        bound_power *= bound;
    }
    Ok(Polynomial::from_coefficients(coefficients))
}

/// ||g(xX)||^2 * D < N^(2m). When it holds every root of g mod N^m below X is
/// a root over the integers.
pub fn satisfies_howgrave_graham(row: &[BigInt], modulus_power: &BigInt) -> bool {
    let squared_norm: BigInt = row.iter().map(|entry| entry * entry).sum();
    squared_norm * BigInt::from(row.len()) < modulus_power * modulus_power
}

/// Lazily walks a reduced basis, yielding the integer roots of each row's
/// candidate polynomial in row order. Rows are processed on demand; roots of a
/// row come out in ascending order and are not deduplicated across rows.
pub struct Roots<'a, O: ProgressObserver> {
    basis: IntegerMatrix,
    bound: BigInt,
    modulus_power: Option<BigInt>,
    observer: &'a O,
    next_row: usize,
    pending: VecDeque<BigInt>,
    skipped_rows: Vec<usize>,
}

impl<'a, O: ProgressObserver> Roots<'a, O> {
    pub fn new(basis: IntegerMatrix, bound: BigInt, observer: &'a O) -> Self {
        Roots {
            basis,
            bound,
            modulus_power: None,
            observer,
            next_row: 0,
            pending: VecDeque::new(),
            skipped_rows: Vec::new(),
        }
    }

    /// Enables the per-row Howgrave-Graham trace check against N^m.
    pub fn with_modulus_power(mut self, modulus_power: BigInt) -> Self {
        self.modulus_power = Some(modulus_power);
        self
    }

    pub fn basis(&self) -> &IntegerMatrix {
        &self.basis
    }

    /// Rows rejected so far because reconstruction was inexact.
    pub fn skipped_rows(&self) -> &[usize] {
        &self.skipped_rows
    }

    fn process_row(&mut self, index: usize) {
        let row = self.basis.row(index);

        if let Some(target) = &self.modulus_power {
            if self.observer.is_enabled(Level::Trace) {
                self.observer.notify(
                    Level::Trace,
                    &format!(
                        "Row {} Howgrave-Graham condition: {}",
                        index,
                        satisfies_howgrave_graham(row, target)
                    ),
                );
            }
        }

        let candidate = match reconstruct_row(index, row, &self.bound) {
            Ok(candidate) => candidate,
            Err(err) => {
                self.observer.notify(Level::Warn, &format!("Skipping row: {}", err));
                self.skipped_rows.push(index);
                return;
            }
        };

        match integer_roots(&candidate) {
            Ok(roots) => {
                if !roots.is_empty() && self.observer.is_enabled(Level::Trace) {
                    self.observer
                        .notify(Level::Trace, &format!("Row {} gives {} integer root(s)", index, roots.len()));
                }
                self.pending.extend(roots);
            }
            Err(SmallRootsError::DegenerateCandidate { .. }) => {}
            Err(err) => {
                self.observer.notify(Level::Warn, &format!("Skipping row {}: {}", index, err));
                self.skipped_rows.push(index);
            }
        }
    }
}

impl<O: ProgressObserver> Iterator for Roots<'_, O> {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        loop {
            if let Some(root) = self.pending.pop_front() {
                return Some(root);
            }
            if self.next_row >= self.basis.num_rows() {
                return None;
            }
            let index = self.next_row;
            self.next_row += 1;
            self.process_row(index);
        }
    }
}

/// True when |r| < X and f(r) = 0 mod N.
pub fn is_small_root(f: &Polynomial, modulus: &BigInt, bound: &BigInt, candidate: &BigInt) -> bool {
    &candidate.abs() < bound && f.evaluate_mod(candidate, modulus).is_zero()
}

/// Keeps the genuine small roots, first occurrence only, in input order.
pub fn verified_roots<I>(candidates: I, f: &Polynomial, modulus: &BigInt, bound: &BigInt) -> Vec<BigInt>
where
    I: IntoIterator<Item = BigInt>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|root| is_small_root(f, modulus, bound, root))
        .filter(|root| seen.insert(root.clone()))
        .collect()
}
