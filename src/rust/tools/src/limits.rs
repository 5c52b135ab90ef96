use std::env;
use std::mem;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::matrix::Weight;

/// Environment override for the per-group fast memory budget, in bytes
pub const LOCAL_MEM_ENV: &str = "FW_LOCAL_MEM_BYTES";
/// Environment override for the largest allowed work group
pub const MAX_WORKERS_ENV: &str = "FW_MAX_WORKERS";

/// Resources available to a single work group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupLimits {
    /// Fast memory shared by one group, in bytes
    pub local_mem_bytes: usize,
    /// Largest group size that may be launched
    pub max_workers: usize,
}

impl Default for GroupLimits {
    fn default() -> GroupLimits {
        GroupLimits { local_mem_bytes: 48 * 1024, max_workers: 1024 }
    }
}

impl GroupLimits {
    /// Defaults, overridden by `FW_LOCAL_MEM_BYTES` and `FW_MAX_WORKERS` when set.
    pub fn query() -> GroupLimits {
        let defaults = GroupLimits::default();
        let limits = GroupLimits {
            local_mem_bytes: env_override(LOCAL_MEM_ENV, defaults.local_mem_bytes),
            max_workers: env_override(MAX_WORKERS_ENV, defaults.max_workers),
        };
        debug!(
            local_mem_bytes = limits.local_mem_bytes,
            max_workers = limits.max_workers,
            "work group limits"
        );
        limits
    }

    /// Bytes needed to stage an n*n matrix, None if that overflows usize.
    pub fn staging_bytes(n: usize) -> Option<usize> {
        n.checked_mul(n)?.checked_mul(mem::size_of::<Weight>())
    }

    /// Fail unless an n*n working buffer fits into one group's fast memory.
    pub fn check_staging(&self, n: usize) -> Result<()> {
        match GroupLimits::staging_bytes(n) {
            Some(required) if required <= self.local_mem_bytes => Ok(()),
            required => Err(Error::Capacity {
                n,
                required: required.unwrap_or(usize::MAX),
                available: self.local_mem_bytes,
            }),
        }
    }

    pub fn check_workers(&self, workers: usize) -> Result<()> {
        if workers == 0 || workers > self.max_workers {
            return Err(Error::InvalidWorkers { requested: workers, max: self.max_workers });
        }
        Ok(())
    }
}

fn env_override<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!(key = key, value = %raw, "ignoring unparseable override");
                default
            }
        },
        Err(_) => default,
    }
}
