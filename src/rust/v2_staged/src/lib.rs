//! Parallel Floyd–Warshall computed in a work-group local working buffer.
//!
//! The kernel stages the whole matrix into fast group memory, runs the same
//! strided relaxation as the direct engine against that buffer only, and
//! finally writes its columns back. The buffer must fit the group's local
//! memory budget, which is checked before anything runs.
use tools::{
    check_repetitions, relax_row, DistanceMatrix, Engine, GroupLimits, Result, SharedCells,
    WorkGroup,
};
use tracing::debug;

pub struct Staged {
    group: WorkGroup,
    limits: GroupLimits,
    repetitions: usize,
}

impl Staged {
    pub fn new(workers: usize) -> Result<Staged> {
        Staged::with_limits(workers, 1, GroupLimits::default())
    }

    pub fn with_limits(workers: usize, repetitions: usize, limits: GroupLimits) -> Result<Staged> {
        check_repetitions(repetitions)?;
        let group = WorkGroup::with_limits(workers, &limits)?;
        Ok(Staged { group, limits, repetitions })
    }

    pub fn workers(&self) -> usize {
        self.group.size()
    }

    /// Fail with a capacity error unless an n*n buffer fits in local memory.
    pub fn prepare(&self, n: usize) -> Result<()> {
        self.limits.check_staging(n)
    }
}

impl Engine for Staged {
    fn name(&self) -> &'static str {
        "parallel-staged"
    }

    fn run(&self, m: &mut DistanceMatrix) -> Result<()> {
        let n = m.len();
        self.prepare(n)?;
        m.check_weights()?;
        let repetitions = self.repetitions;
        debug!(n, workers = self.workers(), repetitions, "staged run");
        let global = SharedCells::over(m);
        let local = SharedCells::scratch(n);
        self.group.launch(|worker| {
            for i in 0..n {
                for j in worker.columns(n) {
                    local.store(i, j, global.load(i, j));
                }
            }
            worker.barrier();
            for _ in 0..repetitions {
                for k in 0..n {
                    for i in 0..n {
                        relax_row(&local, worker, k, i);
                    }
                    worker.barrier();
                }
            }
            // each worker writes back only the columns it owns
            for i in 0..n {
                for j in worker.columns(n) {
                    global.store(i, j, local.load(i, j));
                }
            }
        });
        Ok(())
    }
}
