use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// Integer edge or path weight
pub type Weight = i32;

/// Sentinel for "no path known"
pub const INFINITY: Weight = Weight::MAX;

/// Length of the path i -> k -> j given the lengths of its two halves.
/// Sums saturate at INFINITY instead of wrapping around.
#[inline]
pub fn shortcut(ik: Weight, kj: Weight) -> Weight {
    ik.saturating_add(kj)
}

/// Weights are non-negative. Negative entries would let a pass over k rewrite
/// row and column k while other workers read them.
fn check_weight(row: usize, col: usize, v: Weight) -> Result<()> {
    if v < 0 {
        return Err(Error::InvalidArgument {
            arg: "weight",
            reason: format!("({}, {}) is {}, weights must be non-negative", row, col, v),
        });
    }
    Ok(())
}

/// Dense n*n distance matrix stored row-major in one flat buffer,
/// element (i, j) lives at `n*i + j`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<Weight>,
}

impl DistanceMatrix {
    pub fn new(n: usize, fill: Weight) -> DistanceMatrix {
        DistanceMatrix { n, data: vec![fill; n * n] }
    }

    /// Build a matrix from nested rows, all of which must have `rows.len()`
    /// non-negative elements.
    pub fn from_rows<R: AsRef<[Weight]>>(rows: &[R]) -> Result<DistanceMatrix> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != n {
                return Err(Error::NotSquare { rows: n, row, len: r.len() });
            }
            for (col, &v) in r.iter().enumerate() {
                check_weight(row, col, v)?;
            }
            data.extend_from_slice(r);
        }
        Ok(DistanceMatrix { n, data })
    }

    /// Fill every cell, diagonal included, with a uniform weight in `0..max_weight`.
    /// The same seed always yields the same matrix.
    pub fn random(n: usize, max_weight: Weight, seed: u64) -> Result<DistanceMatrix> {
        if max_weight <= 0 {
            return Err(Error::InvalidArgument {
                arg: "max_weight",
                reason: format!("must be positive, got {}", max_weight),
            });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..n * n).map(|_| rng.gen_range(0..max_weight)).collect();
        Ok(DistanceMatrix { n, data })
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Weight {
        self.data[self.n * i + j]
    }

    /// Panics on a negative weight, see `try_set` for the checked form.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: Weight) {
        assert!(v >= 0, "negative weight {} at ({}, {})", v, i, j);
        self.data[self.n * i + j] = v;
    }

    pub fn try_set(&mut self, i: usize, j: usize, v: Weight) -> Result<()> {
        check_weight(i, j, v)?;
        self.data[self.n * i + j] = v;
        Ok(())
    }

    /// Fail on the first negative cell, e.g. one written through `as_mut_slice`.
    pub fn check_weights(&self) -> Result<()> {
        match self.data.iter().position(|&v| v < 0) {
            Some(p) => check_weight(p / self.n, p % self.n, self.data[p]),
            None => Ok(()),
        }
    }

    pub fn row(&self, i: usize) -> &[Weight] {
        &self.data[self.n * i..self.n * (i + 1)]
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Weight> {
        // chunks(0) panics, an empty matrix has no rows anyway
        self.data.chunks(self.n.max(1))
    }

    pub fn as_slice(&self) -> &[Weight] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Weight] {
        &mut self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<Weight>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (j, &v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if v == INFINITY {
                    write!(f, "inf")?;
                } else {
                    write!(f, "{}", v)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
