use std::mem;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::matrix::{DistanceMatrix, Weight};

// Viewing a Weight buffer as atomics relies on identical layout
const _: () = assert!(mem::size_of::<Weight>() == mem::size_of::<AtomicI32>());
const _: () = assert!(mem::align_of::<Weight>() == mem::align_of::<AtomicI32>());

enum Storage<'a> {
    Borrowed(&'a [AtomicI32]),
    Owned(Vec<AtomicI32>),
}

/// An n*n grid that every worker of a group may read and write concurrently.
///
/// Cells are accessed with relaxed loads and stores. They carry no ordering
/// of their own: a value written by one worker is only guaranteed visible to
/// another after both have passed the same group barrier.
pub struct SharedCells<'a> {
    n: usize,
    storage: Storage<'a>,
}

impl<'a> SharedCells<'a> {
    /// Address `m` in place. The matrix stays exclusively borrowed for the
    /// lifetime of the view.
    pub fn over(m: &'a mut DistanceMatrix) -> SharedCells<'a> {
        let n = m.len();
        let data: &'a mut [Weight] = m.as_mut_slice();
        // SAFETY: AtomicI32 has the same size, alignment and bit validity as i32,
        // and the unique borrow guarantees no non-atomic access while the view lives.
        let cells = unsafe { &*(data as *mut [Weight] as *const [AtomicI32]) };
        SharedCells { n, storage: Storage::Borrowed(cells) }
    }

    /// A fresh zeroed working buffer owned by the view itself.
    pub fn scratch(n: usize) -> SharedCells<'static> {
        let cells = (0..n * n).map(|_| AtomicI32::new(0)).collect();
        SharedCells { n, storage: Storage::Owned(cells) }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    fn cells(&self) -> &[AtomicI32] {
        match &self.storage {
            Storage::Borrowed(cells) => *cells,
            Storage::Owned(cells) => cells.as_slice(),
        }
    }

    #[inline]
    pub fn load(&self, i: usize, j: usize) -> Weight {
        self.cells()[self.n * i + j].load(Ordering::Relaxed)
    }

    #[inline]
    pub fn store(&self, i: usize, j: usize, v: Weight) {
        self.cells()[self.n * i + j].store(v, Ordering::Relaxed)
    }

    /// Snapshot of the current contents. Only meaningful once no kernel is running.
    pub fn to_matrix(&self) -> DistanceMatrix {
        let mut m = DistanceMatrix::new(self.n, 0);
        for (dst, src) in m.as_mut_slice().iter_mut().zip(self.cells()) {
            *dst = src.load(Ordering::Relaxed);
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_writes_through_to_matrix() {
        let mut m = DistanceMatrix::from_rows(&[vec![0, 1], vec![2, 3]]).unwrap();
        {
            let cells = SharedCells::over(&mut m);
            assert_eq!(cells.load(1, 0), 2);
            cells.store(0, 1, 9);
            assert_eq!(cells.to_matrix().get(0, 1), 9);
        }
        assert_eq!(m.to_rows(), vec![vec![0, 9], vec![2, 3]]);
    }

    #[test]
    fn scratch_starts_zeroed() {
        let cells = SharedCells::scratch(3);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells.to_matrix(), DistanceMatrix::new(3, 0));
    }
}
