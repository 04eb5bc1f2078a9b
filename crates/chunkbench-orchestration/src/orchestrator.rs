//! Core orchestration: size sweep, measurement, and result analysis.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use chunkbench_core::{
    ComputeError, MatrixAddition, MatrixMultiplication, Strategy, VectorSum, WorkerBudget,
    Workload,
};

use crate::instances::{random_matrix, random_vector};
use crate::interfaces::{
    Measurement, OperationReport, ResultPresenter, SizeReport, BASELINE_LABEL,
};
use crate::operation::Operation;
use crate::options::{sweep_sizes, SweepOptions};
use crate::runner::{measure, Timing};

/// Sweep `operation` over every configured size, measuring each selected
/// strategy, and stream the measurements to `presenter`.
///
/// Inputs for every size come from one generator seeded with `opts.seed`,
/// so two sweeps with the same options measure identical instances. Only an
/// invalid worker budget, upper bound or instance size aborts the sweep; a
/// failing strategy is recorded in its measurement and the sweep continues.
pub fn run_operation(
    operation: Operation,
    opts: &SweepOptions,
    strategies: &[Strategy],
    baseline: bool,
    presenter: &dyn ResultPresenter,
) -> Result<OperationReport, ComputeError> {
    let budget = WorkerBudget::new(opts.workers)?;
    opts.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
    presenter.present_operation(operation);

    let mut sizes = Vec::with_capacity(opts.sizes);
    for size in sweep_sizes(opts) {
        presenter.present_size(operation, size, opts);
        debug!(%operation, size, "generating instance");
        let report = match operation {
            Operation::VectorSum => {
                let values = random_vector(&mut rng, size, opts.upper_bound)?;
                let workload = VectorSum::new(values, budget);
                measure_workload(&workload, size, opts.runs, strategies, baseline, presenter)
            }
            Operation::MatrixAddition => {
                let a = random_matrix(&mut rng, size, size, opts.upper_bound)?;
                let b = random_matrix(&mut rng, size, size, opts.upper_bound)?;
                let workload = MatrixAddition::new(a, b, budget)?;
                measure_workload(&workload, size, opts.runs, strategies, baseline, presenter)
            }
            Operation::MatrixMultiplication => {
                let a = random_matrix(&mut rng, size, size, opts.upper_bound)?;
                let b = random_matrix(&mut rng, size, size, opts.upper_bound)?;
                let workload = MatrixMultiplication::new(a, b, budget)?;
                measure_workload(&workload, size, opts.runs, strategies, baseline, presenter)
            }
        };
        if !report.consistent {
            presenter.present_error(&format!(
                "{}: strategies disagree for size {size}",
                operation.title()
            ));
        }
        sizes.push(report);
    }

    Ok(OperationReport {
        operation,
        workers: opts.workers,
        runs: opts.runs,
        seed: opts.seed,
        sizes,
    })
}

fn measure_workload<W: Workload>(
    workload: &W,
    size: usize,
    runs: u32,
    strategies: &[Strategy],
    baseline: bool,
    presenter: &dyn ResultPresenter,
) -> SizeReport {
    let mut measurements = Vec::with_capacity(strategies.len() + usize::from(baseline));
    let mut outputs = Vec::with_capacity(measurements.capacity());

    if baseline {
        let timing = measure(runs, || Ok(workload.sequential()));
        measurements.push(record(BASELINE_LABEL, None, timing, &mut outputs, presenter));
    }
    for &strategy in strategies {
        let timing = measure(runs, || workload.compute(strategy));
        measurements.push(record(
            strategy.as_str(),
            Some(strategy),
            timing,
            &mut outputs,
            presenter,
        ));
    }

    let consistent = match analyze_consistency(&outputs) {
        Err(ComputeError::Mismatch) => {
            warn!(workload = workload.name(), size, "strategies disagree");
            false
        }
        _ => true,
    };
    SizeReport {
        size,
        measurements,
        consistent,
    }
}

fn record<T>(
    label: &str,
    strategy: Option<Strategy>,
    timing: Result<Timing<T>, ComputeError>,
    outputs: &mut Vec<T>,
    presenter: &dyn ResultPresenter,
) -> Measurement {
    let measurement = match timing {
        Ok(timing) => {
            let average = timing.average_ns();
            info!(strategy = label, average_ns = average, "measured");
            let durations_ns = timing.durations_ns;
            outputs.push(timing.output);
            Measurement {
                label: label.to_string(),
                strategy,
                durations_ns,
                average_ns: Some(average),
                error: None,
            }
        }
        Err(e) => {
            warn!(strategy = label, error = %e, "measurement failed");
            Measurement {
                label: label.to_string(),
                strategy,
                durations_ns: Vec::new(),
                average_ns: None,
                error: Some(e),
            }
        }
    };
    presenter.present_measurement(&measurement);
    measurement
}

/// Check that every successful output is identical.
///
/// Returns `ComputeError::Mismatch` on disagreement, and a configuration
/// error when there is nothing to compare.
pub fn analyze_consistency<T: PartialEq>(outputs: &[T]) -> Result<(), ComputeError> {
    let Some((first, rest)) = outputs.split_first() else {
        return Err(ComputeError::Config("no successful results".into()));
    };
    if rest.iter().any(|output| output != first) {
        return Err(ComputeError::Mismatch);
    }
    Ok(())
}
