//! Shared building blocks for the Floyd–Warshall engines: the distance matrix
//! handle, the work-group runtime, capacity limits, timing and verification.
pub mod cells;
pub mod engine;
pub mod error;
pub mod group;
pub mod limits;
pub mod matrix;
pub mod timer;
pub mod verify;

pub use cells::SharedCells;
pub use engine::{check_repetitions, Engine};
pub use error::{Error, Result};
pub use group::{relax_row, WorkGroup, Worker};
pub use limits::GroupLimits;
pub use matrix::{shortcut, DistanceMatrix, Weight, INFINITY};
