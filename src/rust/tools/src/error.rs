//! Error types shared by every engine

use thiserror::Error;

/// Result type alias using the tools Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up an engine run.
///
/// Engines never fail half-way through a computation: every variant here is
/// produced by an eager check before any worker touches a matrix.
#[derive(Error, Debug)]
pub enum Error {
    /// The staged working buffer does not fit into one group's fast memory
    #[error("{n}x{n} matrix needs {required} bytes of local memory, but a work group only has {available}")]
    Capacity {
        /// Requested matrix size
        n: usize,
        /// Bytes the working buffer would occupy
        required: usize,
        /// Bytes available to one work group
        available: usize,
    },

    /// Worker count outside `1..=max`
    #[error("invalid worker count {requested}, a work group holds 1 to {max} workers")]
    InvalidWorkers {
        /// Requested worker count
        requested: usize,
        /// Largest supported group size
        max: usize,
    },

    /// Rows of unequal length, or row count different from row length
    #[error("matrix is not square: {rows} rows, row {row} has {len} columns")]
    NotSquare {
        /// Number of rows given
        rows: usize,
        /// First offending row
        row: usize,
        /// Its length
        len: usize,
    },

    /// Invalid argument to a constructor
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Argument name
        arg: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The worker pool backing a group could not be started
    #[error("failed to start work group: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
