use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;

/// One way of computing all-pairs shortest distances in place.
pub trait Engine {
    /// Label used in benchmark output
    fn name(&self) -> &'static str;

    /// Replace every `m[i][j]` with the shortest i -> j distance.
    /// All errors are raised before `m` is touched.
    fn run(&self, m: &mut DistanceMatrix) -> Result<()>;
}

/// Repetition factors must be at least one.
pub fn check_repetitions(repetitions: usize) -> Result<()> {
    if repetitions == 0 {
        return Err(Error::InvalidArgument {
            arg: "repetitions",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
