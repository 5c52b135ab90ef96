use std::iter::StepBy;
use std::ops::Range;
use std::sync::Barrier;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::cells::SharedCells;
use crate::error::Result;
use crate::limits::GroupLimits;
use crate::matrix::shortcut;

/// A fixed set of W workers that run one kernel together and synchronize
/// only through a group-wide barrier.
pub struct WorkGroup {
    pool: ThreadPool,
    size: usize,
}

/// One worker's handle inside a running kernel.
pub struct Worker<'g> {
    id: usize,
    size: usize,
    barrier: &'g Barrier,
}

impl WorkGroup {
    pub fn new(workers: usize) -> Result<WorkGroup> {
        WorkGroup::with_limits(workers, &GroupLimits::default())
    }

    /// Start a group of `workers` threads, refusing sizes the limits do not allow.
    pub fn with_limits(workers: usize, limits: &GroupLimits) -> Result<WorkGroup> {
        limits.check_workers(workers)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fw-worker-{}", i))
            .build()?;
        Ok(WorkGroup { pool, size: workers })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Run `kernel` exactly once on every worker and return when all of them are done.
    pub fn launch<F>(&self, kernel: F)
    where
        F: Fn(&Worker<'_>) + Sync,
    {
        let barrier = Barrier::new(self.size);
        debug!(workers = self.size, "launching kernel");
        // broadcast runs the closure once on each of the pool's threads
        self.pool.broadcast(|ctx| {
            let worker = Worker { id: ctx.index(), size: self.size, barrier: &barrier };
            kernel(&worker);
        });
    }
}

impl<'g> Worker<'g> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Columns owned by this worker: id, id+W, id+2W, ... below n.
    #[inline]
    pub fn columns(&self, n: usize) -> StepBy<Range<usize>> {
        (self.id..n).step_by(self.size)
    }

    /// Block until every worker of the group has arrived.
    #[inline]
    pub fn barrier(&self) {
        self.barrier.wait();
    }
}

/// Relax row `i` through vertex `k` over the columns owned by `worker`.
/// A cell is only written when the path through `k` is strictly shorter.
#[inline]
pub fn relax_row(cells: &SharedCells<'_>, worker: &Worker<'_>, k: usize, i: usize) {
    let n = cells.len();
    let ik = cells.load(i, k);
    for j in worker.columns(n) {
        let z = shortcut(ik, cells.load(k, j));
        if z < cells.load(i, j) {
            cells.store(i, j, z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn strided_columns_partition_the_range() {
        let barrier = Barrier::new(1);
        for &(size, n) in &[(1, 5), (2, 5), (3, 9), (4, 3), (8, 2)] {
            let mut seen = vec![0; n];
            for id in 0..size {
                let worker = Worker { id, size, barrier: &barrier };
                for j in worker.columns(n) {
                    seen[j] += 1;
                }
            }
            assert!(seen.iter().all(|&c| c == 1), "size={} n={}", size, n);
        }
    }

    #[test]
    fn launch_runs_every_worker_once() {
        let group = WorkGroup::new(4).unwrap();
        let ids = Mutex::new(Vec::new());
        group.launch(|w| ids.lock().unwrap().push(w.id()));
        let mut ids = ids.into_inner().unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn barrier_separates_phases() {
        let group = WorkGroup::new(3).unwrap();
        let arrived = AtomicUsize::new(0);
        let early = AtomicUsize::new(0);
        group.launch(|w| {
            arrived.fetch_add(1, Ordering::SeqCst);
            w.barrier();
            if arrived.load(Ordering::SeqCst) != w.size() {
                early.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert_eq!(early.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(WorkGroup::new(0).is_err());
    }
}
