//! Sweep configuration.

use chunkbench_core::constants::{
    DEFAULT_GROWTH, DEFAULT_RUNS, DEFAULT_SEED, DEFAULT_SIZE_COUNT, DEFAULT_START_SIZE,
    DEFAULT_UPPER_BOUND, DEFAULT_WORKER_BUDGET,
};
use chunkbench_core::ComputeError;

/// Knobs for one benchmark sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOptions {
    /// Number of problem sizes per operation.
    pub sizes: usize,
    /// First problem size (vector length or matrix side).
    pub start_size: usize,
    /// Multiplier between consecutive sizes.
    pub growth: usize,
    /// Worker budget `T` for every strategy.
    pub workers: usize,
    /// Timed repetitions per strategy and size.
    pub runs: u32,
    /// Exclusive upper bound of generated values.
    pub upper_bound: i64,
    /// Seed of the input generator.
    pub seed: u64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZE_COUNT,
            start_size: DEFAULT_START_SIZE,
            growth: DEFAULT_GROWTH,
            workers: DEFAULT_WORKER_BUDGET,
            runs: DEFAULT_RUNS,
            upper_bound: DEFAULT_UPPER_BOUND,
            seed: DEFAULT_SEED,
        }
    }
}

impl SweepOptions {
    /// Normalize options, applying defaults where values are zero.
    ///
    /// `start_size` may legitimately be zero. The upper bound is left alone;
    /// `validate` rejects it when non-positive.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.sizes == 0 {
            self.sizes = DEFAULT_SIZE_COUNT;
        }
        if self.growth == 0 {
            self.growth = DEFAULT_GROWTH;
        }
        if self.workers == 0 {
            self.workers = DEFAULT_WORKER_BUDGET;
        }
        if self.runs == 0 {
            self.runs = DEFAULT_RUNS;
        }
        self
    }

    /// Reject options no sweep can run with.
    pub fn validate(&self) -> Result<(), ComputeError> {
        if self.upper_bound <= 0 {
            return Err(ComputeError::Config(format!(
                "upper bound must be positive, got {}",
                self.upper_bound
            )));
        }
        Ok(())
    }
}

/// Problem sizes of a sweep: `start, start * growth, ...`, saturating.
#[must_use]
pub fn sweep_sizes(opts: &SweepOptions) -> Vec<usize> {
    std::iter::successors(Some(opts.start_size), |&size| {
        Some(size.saturating_mul(opts.growth))
    })
    .take(opts.sizes)
    .collect()
}
