//! CLI result presenters.

use std::time::Duration;

use chunkbench_orchestration::interfaces::{Measurement, ResultPresenter};
use chunkbench_orchestration::{Operation, SweepOptions};

use crate::output::{format_average, format_duration, format_size_header};
use crate::ui::{print_error, print_operation_banner};

/// Text presenter in the classic report layout.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Text printed for one measurement; `None` when nothing is shown.
    #[must_use]
    pub fn render_measurement(&self, measurement: &Measurement) -> Option<String> {
        let average = measurement.average_ns?;
        if self.quiet {
            return Some(format!("{} {average}", measurement.label));
        }
        let mut line = format_average(&measurement.label, average);
        if self.verbose {
            let runs: Vec<String> = measurement
                .durations_ns
                .iter()
                .map(|&ns| format_duration(Duration::from_nanos(ns)))
                .collect();
            line.push_str(&format!("  [{}]", runs.join(", ")));
        }
        Some(line)
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_operation(&self, operation: Operation) {
        if self.quiet {
            return;
        }
        println!();
        print_operation_banner(operation);
    }

    fn present_size(&self, operation: Operation, size: usize, opts: &SweepOptions) {
        if self.quiet {
            return;
        }
        println!("\n{}", format_size_header(operation, size, opts));
    }

    fn present_measurement(&self, measurement: &Measurement) {
        if let Some(error) = &measurement.error {
            self.present_error(&format!("{}: {error}", measurement.label));
        } else if let Some(line) = self.render_measurement(measurement) {
            println!("{line}");
        }
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}

/// Presenter used with `--format json`: stdout is reserved for the final
/// report, so only errors are shown while the sweep runs.
pub struct JsonPresenter;

impl ResultPresenter for JsonPresenter {
    fn present_operation(&self, _operation: Operation) {}

    fn present_size(&self, _operation: Operation, _size: usize, _opts: &SweepOptions) {}

    fn present_measurement(&self, measurement: &Measurement) {
        if let Some(error) = &measurement.error {
            self.present_error(&format!("{}: {error}", measurement.label));
        }
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkbench_core::{ComputeError, Strategy};

    fn measurement(average_ns: Option<u64>, error: Option<ComputeError>) -> Measurement {
        Measurement {
            label: "fork-join".into(),
            strategy: Some(Strategy::ForkJoin),
            durations_ns: vec![2_000, 4_000],
            average_ns,
            error,
        }
    }

    #[test]
    fn normal_line() {
        let presenter = CLIResultPresenter::new(false, false);
        assert_eq!(
            presenter.render_measurement(&measurement(Some(3_000), None)).unwrap(),
            "fork-join                : 3000ns (0.003000ms)"
        );
    }

    #[test]
    fn quiet_line() {
        let presenter = CLIResultPresenter::new(false, true);
        assert_eq!(
            presenter.render_measurement(&measurement(Some(3_000), None)).unwrap(),
            "fork-join 3000"
        );
    }

    #[test]
    fn verbose_line_lists_runs() {
        let presenter = CLIResultPresenter::new(true, false);
        let line = presenter.render_measurement(&measurement(Some(3_000), None)).unwrap();
        assert!(line.ends_with("[2.00µs, 4.00µs]"), "{line}");
    }

    #[test]
    fn failed_measurement_has_no_line() {
        let presenter = CLIResultPresenter::new(false, false);
        let failed = measurement(None, Some(ComputeError::WorkerPanicked("boom".into())));
        assert!(presenter.render_measurement(&failed).is_none());
        presenter.present_measurement(&failed);
    }

    #[test]
    fn presenters_do_not_panic() {
        let opts = SweepOptions::default();
        for presenter in [
            Box::new(CLIResultPresenter::new(false, false)) as Box<dyn ResultPresenter>,
            Box::new(CLIResultPresenter::new(false, true)),
            Box::new(JsonPresenter),
        ] {
            presenter.present_operation(Operation::MatrixMultiplication);
            presenter.present_size(Operation::MatrixMultiplication, 10, &opts);
            presenter.present_measurement(&measurement(Some(1), None));
            presenter.present_error("test error message");
        }
    }
}
