//! The four interchangeable concurrency strategies.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::workload::ComputeError;

/// Concurrency model used to compute a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One scoped OS thread per non-empty chunk, joined before returning.
    Threads,
    /// Recursive halving (or quartering) on a bounded work-stealing pool.
    ForkJoin,
    /// One task per chunk submitted to a fixed-size worker pool.
    WorkerPool,
    /// Parallel iterators; the runtime picks the granularity.
    Stream,
}

impl Strategy {
    /// Every strategy, in reporting order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Threads,
        Strategy::ForkJoin,
        Strategy::WorkerPool,
        Strategy::Stream,
    ];

    /// Stable identifier used on the command line and in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Threads => "threads",
            Self::ForkJoin => "fork-join",
            Self::WorkerPool => "worker-pool",
            Self::Stream => "stream",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ComputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "threads" | "thread" => Ok(Self::Threads),
            "fork-join" | "forkjoin" | "fork_join" => Ok(Self::ForkJoin),
            "worker-pool" | "pool" | "worker_pool" | "executor" => Ok(Self::WorkerPool),
            "stream" | "par-iter" => Ok(Self::Stream),
            other => Err(ComputeError::Config(format!("unknown strategy: {other}"))),
        }
    }
}
