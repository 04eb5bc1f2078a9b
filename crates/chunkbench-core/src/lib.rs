//! # chunkbench-core
//!
//! Core library for chunkbench: partitions bulk integer computations (vector
//! sum, matrix addition, matrix multiplication) into disjoint pieces, runs
//! them under four concurrency strategies, and merges the partial results.

pub mod aggregate;
pub mod constants;
pub mod fork_join;
pub mod lifecycle;
pub mod matrix;
pub mod matrix_add;
pub mod matrix_mul;
pub mod partition;
pub mod pool;
pub mod split_tree;
pub mod strategy;
pub mod stream;
pub mod threads;
pub mod vector_sum;
pub mod workload;

// Re-exports
pub use constants::{
    exit_codes, DEFAULT_GROWTH, DEFAULT_RUNS, DEFAULT_SEED, DEFAULT_SIZE_COUNT, DEFAULT_START_SIZE,
    DEFAULT_UPPER_BOUND, DEFAULT_WORKER_BUDGET,
};
pub use lifecycle::{Invocation, NoOpObserver, Phase, PhaseObserver};
pub use matrix::Matrix;
pub use matrix_add::MatrixAddition;
pub use matrix_mul::MatrixMultiplication;
pub use partition::{Block, WorkerBudget};
pub use strategy::Strategy;
pub use vector_sum::VectorSum;
pub use workload::{ComputeError, Workload};

/// Sum `values` with every strategy and return the common result.
///
/// Convenience for simple use cases; fails with `ComputeError::Mismatch` if
/// two strategies disagree.
///
/// # Example
/// ```
/// assert_eq!(chunkbench_core::sum_all(vec![1; 10], 3).unwrap(), 10);
/// assert_eq!(chunkbench_core::sum_all(Vec::new(), 1000).unwrap(), 0);
/// ```
pub fn sum_all(values: Vec<i64>, workers: usize) -> Result<i64, ComputeError> {
    let sum = VectorSum::new(values, WorkerBudget::new(workers)?);
    let expected = sum.sequential();
    for strategy in Strategy::ALL {
        if sum.compute(strategy)? != expected {
            return Err(ComputeError::Mismatch);
        }
    }
    Ok(expected)
}
