//! Orchestration interfaces and report types.

use serde::{Serialize, Serializer};

use chunkbench_core::{ComputeError, Strategy};

use crate::operation::Operation;
use crate::options::SweepOptions;

/// Label used for the single-threaded reference measurement.
pub const BASELINE_LABEL: &str = "sequential";

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Start of an operation's section.
    fn present_operation(&self, operation: Operation);

    /// Start of one problem size within the current operation.
    fn present_size(&self, operation: Operation, size: usize, opts: &SweepOptions);

    /// One strategy's measurement (or its failure).
    fn present_measurement(&self, measurement: &Measurement);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Timing of one strategy (or the baseline) at one problem size.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    /// Strategy identifier, or `sequential` for the baseline.
    pub label: String,
    /// `None` for the baseline.
    pub strategy: Option<Strategy>,
    /// Wall-clock duration of every run, in nanoseconds.
    pub durations_ns: Vec<u64>,
    /// Integer mean of `durations_ns`; absent when the measurement failed.
    pub average_ns: Option<u64>,
    /// Why the measurement was aborted.
    #[serde(serialize_with = "error_as_string")]
    pub error: Option<ComputeError>,
}

impl Measurement {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

fn error_as_string<S: Serializer>(error: &Option<ComputeError>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_some(&e.to_string()),
        None => s.serialize_none(),
    }
}

/// All measurements for one problem size.
#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    pub size: usize,
    pub measurements: Vec<Measurement>,
    /// Whether every successful measurement produced the same result.
    pub consistent: bool,
}

/// A full sweep of one operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: Operation,
    pub workers: usize,
    pub runs: u32,
    pub seed: u64,
    pub sizes: Vec<SizeReport>,
}

impl OperationReport {
    /// First problem found in the sweep: a disagreement between strategies
    /// takes precedence over a failed measurement.
    pub fn status(&self) -> Result<(), ComputeError> {
        if self.sizes.iter().any(|s| !s.consistent) {
            return Err(ComputeError::Mismatch);
        }
        self.sizes
            .iter()
            .flat_map(|s| &s.measurements)
            .find_map(|m| m.error.clone())
            .map_or(Ok(()), Err)
    }
}

/// Presenter that discards everything.
pub struct NullPresenter;

impl ResultPresenter for NullPresenter {
    fn present_operation(&self, _operation: Operation) {}
    fn present_size(&self, _operation: Operation, _size: usize, _opts: &SweepOptions) {}
    fn present_measurement(&self, _measurement: &Measurement) {}
    fn present_error(&self, _error: &str) {}
}
