//! The compute contract shared by every operation.
//!
//! `Workload` is implemented once per operation (vector sum, matrix
//! addition, matrix multiplication). Each implementation answers every
//! `Strategy` through explicit dispatch in `run`; `compute` wraps that in an
//! `Invocation` so observers see the phase transitions.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::lifecycle::{Invocation, NoOpObserver, Phase, PhaseObserver};
use crate::partition::WorkerBudget;
use crate::strategy::Strategy;

/// Error type for strategy invocations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComputeError {
    /// Invalid worker budget or input shape.
    #[error("configuration error: {0}")]
    Config(String),

    /// A join or await ended before the sub-unit delivered its result.
    #[error("wait interrupted: {0}")]
    Interrupted(String),

    /// A sub-unit panicked while computing its partition.
    #[error("worker panicked: {0}")]
    WorkerPanicked(String),

    /// The host refused to create a worker thread.
    #[error("failed to spawn worker: {0}")]
    Spawn(String),

    /// Strategies disagreed on the result for the same inputs.
    #[error("result mismatch between strategies")]
    Mismatch,
}

/// An operation that can be computed under every concurrency strategy.
pub trait Workload: Send + Sync {
    /// Final result of one invocation.
    type Output: Clone + PartialEq + fmt::Debug + Send;

    /// Human-readable operation name.
    fn name(&self) -> &'static str;

    /// Worker budget the workload was built with.
    fn budget(&self) -> WorkerBudget;

    /// Number of elements in the problem space (output cells, or input
    /// elements for reductions).
    fn problem_size(&self) -> usize;

    /// Direct single-threaded definition of the operation.
    fn sequential(&self) -> Self::Output;

    /// Run one strategy. Implementations dispatch on `strategy` and advance
    /// `invocation` through `Dispatched`, `Running` and `Joined`.
    fn run(
        &self,
        strategy: Strategy,
        invocation: &mut Invocation<'_>,
    ) -> Result<Self::Output, ComputeError>;

    /// Compute the full result with `strategy`.
    fn compute(&self, strategy: Strategy) -> Result<Self::Output, ComputeError> {
        self.compute_observed(strategy, &NoOpObserver)
    }

    /// Compute the full result with `strategy`, reporting phases to `observer`.
    fn compute_observed(
        &self,
        strategy: Strategy,
        observer: &dyn PhaseObserver,
    ) -> Result<Self::Output, ComputeError> {
        let mut invocation = Invocation::start(strategy, observer);
        let output = self.run(strategy, &mut invocation)?;
        invocation.advance(Phase::Done);
        Ok(output)
    }

    /// Fixed thread per chunk.
    fn threads(&self) -> Result<Self::Output, ComputeError> {
        self.compute(Strategy::Threads)
    }

    /// Divide and conquer on a work-stealing pool.
    fn fork_join(&self) -> Result<Self::Output, ComputeError> {
        self.compute(Strategy::ForkJoin)
    }

    /// Fixed-size worker pool with one task per chunk.
    fn worker_pool(&self) -> Result<Self::Output, ComputeError> {
        self.compute(Strategy::WorkerPool)
    }

    /// Data-parallel iterators.
    fn stream(&self) -> Result<Self::Output, ComputeError> {
        self.compute(Strategy::Stream)
    }
}

/// Extract a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Run `f`, turning a panic that escapes it into `WorkerPanicked`.
pub(crate) fn catch_worker_panic<T>(f: impl FnOnce() -> T) -> Result<T, ComputeError> {
    catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| ComputeError::WorkerPanicked(panic_message(payload.as_ref())))
}
