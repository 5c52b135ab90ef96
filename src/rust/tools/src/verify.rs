#[cfg(not(feature = "no-multi-thread"))]
use rayon::prelude::*;
use thiserror::Error;

use crate::matrix::{DistanceMatrix, Weight};

/// Two result matrices disagree.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Mismatch {
    #[error("size mismatch: expected {expected}x{expected}, got {actual}x{actual}")]
    Size { expected: usize, actual: usize },
    #[error("mismatch at ({row}, {col}): expected {expected}, got {actual}")]
    Value { row: usize, col: usize, expected: Weight, actual: Weight },
}

/// Compare element-wise, reporting the first differing cell in row-major order.
pub fn compare(expected: &DistanceMatrix, actual: &DistanceMatrix) -> Result<(), Mismatch> {
    if expected.len() != actual.len() {
        return Err(Mismatch::Size { expected: expected.len(), actual: actual.len() });
    }
    let n = expected.len();
    if n == 0 {
        return Ok(());
    }
    let first_diff = |(row, (e, a)): (usize, (&[Weight], &[Weight]))| {
        e.iter()
            .zip(a)
            .position(|(x, y)| x != y)
            .map(|col| Mismatch::Value { row, col, expected: e[col], actual: a[col] })
    };
    #[cfg(not(feature = "no-multi-thread"))]
    let found = expected
        .as_slice()
        .par_chunks(n)
        .zip(actual.as_slice().par_chunks(n))
        .enumerate()
        .find_map_first(first_diff);
    #[cfg(feature = "no-multi-thread")]
    let found = expected.rows().zip(actual.rows()).enumerate().find_map(first_diff);
    match found {
        Some(m) => Err(m),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_matrices_pass() {
        let a = DistanceMatrix::random(9, 50, 3).unwrap();
        assert_eq!(compare(&a, &a.clone()), Ok(()));
    }

    #[test]
    fn first_difference_is_reported() {
        let a = DistanceMatrix::new(4, 1);
        let mut b = a.clone();
        b.set(3, 0, 7);
        b.set(2, 3, 5);
        assert_eq!(
            compare(&a, &b),
            Err(Mismatch::Value { row: 2, col: 3, expected: 1, actual: 5 })
        );
    }

    #[test]
    fn size_difference_is_reported() {
        let err = compare(&DistanceMatrix::new(2, 0), &DistanceMatrix::new(3, 0)).unwrap_err();
        assert_eq!(err, Mismatch::Size { expected: 2, actual: 3 });
        assert_eq!(err.to_string(), "size mismatch: expected 2x2, got 3x3");
    }
}
