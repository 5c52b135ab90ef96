//! Sequential Floyd–Warshall, the reference every other engine is checked against.
use tools::{check_repetitions, shortcut, DistanceMatrix, Engine, Result, Weight};
use tracing::debug;

/// Relax all pairs through every vertex k, in increasing k.
#[inline]
fn _floyd_warshall(d: &mut [Weight], n: usize) {
    for k in 0..n {
        for i in 0..n {
            let x = d[n*i + k];
            for j in 0..n {
                let z = shortcut(x, d[n*k + j]);
                if z < d[n*i + j] {
                    d[n*i + j] = z;
                }
            }
        }
    }
}

/// Compute all-pairs shortest distances in place.
pub fn floyd_warshall(m: &mut DistanceMatrix) {
    let n = m.len();
    _floyd_warshall(m.as_mut_slice(), n);
}

pub struct Sequential {
    repetitions: usize,
}

impl Sequential {
    pub fn new() -> Sequential {
        Sequential { repetitions: 1 }
    }

    /// Repeat the full k = 0..n sweep `repetitions` times.
    /// Extra sweeps find nothing to relax and only add running time.
    pub fn with_repetitions(repetitions: usize) -> Result<Sequential> {
        check_repetitions(repetitions)?;
        Ok(Sequential { repetitions })
    }
}

impl Default for Sequential {
    fn default() -> Sequential {
        Sequential::new()
    }
}

impl Engine for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn run(&self, m: &mut DistanceMatrix) -> Result<()> {
        m.check_weights()?;
        debug!(n = m.len(), repetitions = self.repetitions, "sequential run");
        for _ in 0..self.repetitions {
            floyd_warshall(m);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tools::INFINITY;

    #[test]
    fn three_vertex_graph() {
        let mut m = DistanceMatrix::from_rows(&[
            vec![0, 3, 8],
            vec![INFINITY, 0, 1],
            vec![4, INFINITY, 0],
        ])
        .unwrap();
        Sequential::new().run(&mut m).unwrap();
        assert_eq!(m.to_rows(), vec![vec![0, 3, 4], vec![5, 0, 1], vec![4, 7, 0]]);
    }

    #[test]
    fn disconnected_pairs_stay_infinite() {
        let mut m = DistanceMatrix::from_rows(&[vec![0, INFINITY], vec![INFINITY, 0]]).unwrap();
        floyd_warshall(&mut m);
        assert_eq!(m.get(0, 1), INFINITY);
        assert_eq!(m.get(1, 0), INFINITY);
    }

    #[test]
    fn repetitions_do_not_change_the_result() {
        let input = DistanceMatrix::random(12, 20, 5).unwrap();
        let mut once = input.clone();
        let mut thrice = input;
        Sequential::new().run(&mut once).unwrap();
        Sequential::with_repetitions(3).unwrap().run(&mut thrice).unwrap();
        assert_eq!(once, thrice);
    }

    #[test]
    fn zero_repetitions_is_rejected() {
        assert!(Sequential::with_repetitions(0).is_err());
    }
}
