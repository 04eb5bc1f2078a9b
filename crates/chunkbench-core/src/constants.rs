//! Default benchmark knobs and process exit codes.

/// Number of problem sizes swept per operation.
pub const DEFAULT_SIZE_COUNT: usize = 3;

/// First problem size of a sweep (vector length or square matrix side).
pub const DEFAULT_START_SIZE: usize = 10;

/// Multiplier applied to the problem size between sweep steps.
pub const DEFAULT_GROWTH: usize = 10;

/// Worker budget `T` handed to every strategy.
pub const DEFAULT_WORKER_BUDGET: usize = 1000;

/// Timed repetitions per strategy and size.
pub const DEFAULT_RUNS: u32 = 5;

/// Exclusive upper bound for generated element values.
pub const DEFAULT_UPPER_BOUND: i64 = 2;

/// Seed for the input generator when none is configured.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error (a worker failed, a thread could not be spawned).
    pub const ERROR_GENERIC: i32 = 1;
    /// Strategies produced different results for the same instance.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
