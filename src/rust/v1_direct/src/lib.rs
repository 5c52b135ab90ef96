//! Parallel Floyd–Warshall on the shared matrix itself.
//!
//! Every worker of one group walks all rows in order and relaxes its strided
//! share of the columns. The only synchronization is a group barrier after
//! each complete k pass, so no worker starts k+1 before every write for k is
//! visible.
use tools::{
    check_repetitions, relax_row, DistanceMatrix, Engine, GroupLimits, Result, SharedCells,
    WorkGroup,
};
use tracing::debug;

pub struct Direct {
    group: WorkGroup,
    repetitions: usize,
}

impl Direct {
    pub fn new(workers: usize) -> Result<Direct> {
        Direct::with_limits(workers, 1, &GroupLimits::default())
    }

    pub fn with_limits(workers: usize, repetitions: usize, limits: &GroupLimits) -> Result<Direct> {
        check_repetitions(repetitions)?;
        let group = WorkGroup::with_limits(workers, limits)?;
        Ok(Direct { group, repetitions })
    }

    pub fn workers(&self) -> usize {
        self.group.size()
    }
}

impl Engine for Direct {
    fn name(&self) -> &'static str {
        "parallel-direct"
    }

    fn run(&self, m: &mut DistanceMatrix) -> Result<()> {
        m.check_weights()?;
        let n = m.len();
        let repetitions = self.repetitions;
        debug!(n, workers = self.workers(), repetitions, "direct run");
        let cells = SharedCells::over(m);
        self.group.launch(|worker| {
            for _ in 0..repetitions {
                for k in 0..n {
                    for i in 0..n {
                        relax_row(&cells, worker, k, i);
                    }
                    worker.barrier();
                }
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tools::INFINITY;

    #[test]
    fn three_vertex_graph() {
        for &w in &[1, 2, 4] {
            let mut m = DistanceMatrix::from_rows(&[
                vec![0, 3, 8],
                vec![INFINITY, 0, 1],
                vec![4, INFINITY, 0],
            ])
            .unwrap();
            Direct::new(w).unwrap().run(&mut m).unwrap();
            assert_eq!(m.to_rows(), vec![vec![0, 3, 4], vec![5, 0, 1], vec![4, 7, 0]], "W={}", w);
        }
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(Direct::new(0).is_err());
        assert!(Direct::with_limits(2, 0, &GroupLimits::default()).is_err());
        let small = GroupLimits { local_mem_bytes: 0, max_workers: 2 };
        assert!(Direct::with_limits(3, 1, &small).is_err());
    }
}
