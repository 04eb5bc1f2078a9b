//! CLI output formatting.

use std::io::{self, Write};
use std::time::Duration;

use chunkbench_orchestration::{Operation, OperationReport, SweepOptions};

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Operation title centered in a 50-column banner: `--- Vector Sum ---`.
#[must_use]
pub fn format_operation_banner(operation: Operation) -> String {
    format!("{:>50}", format!("--- {} ---", operation.title()))
}

/// Size header: `>>> For an array of length 10 (avg. time for 5 tests and 1000 threads)`.
#[must_use]
pub fn format_size_header(operation: Operation, size: usize, opts: &SweepOptions) -> String {
    format!(
        ">>> For {} (avg. time for {} tests and {} threads)",
        operation.describe_size(size),
        opts.runs,
        opts.workers
    )
}

/// One measurement line: `threads                  : 1234ns (0.001234ms)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_average(label: &str, average_ns: u64) -> String {
    format!("{label:<25}: {average_ns}ns ({:.6}ms)", average_ns as f64 / 1e6)
}

/// Write the reports as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an I/O error if serialization or the write fails.
pub fn write_json(out: &mut dyn Write, reports: &[OperationReport]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkbench_orchestration::interfaces::NullPresenter;
    use chunkbench_orchestration::run_operation;
    use chunkbench_core::Strategy;

    #[test]
    fn format_duration_micro() {
        let s = format_duration(Duration::from_nanos(500));
        assert!(s.contains("µs"));
    }

    #[test]
    fn format_duration_milli() {
        let s = format_duration(Duration::from_millis(42));
        assert!(s.contains("ms"));
    }

    #[test]
    fn format_duration_minutes() {
        let s = format_duration(Duration::from_secs(90));
        assert_eq!(s, "1m30.0s");
    }

    #[test]
    fn format_number_thousands() {
        assert_eq!(format_number(1_000_000), "1,000,000");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1234), "1,234");
    }

    #[test]
    fn banner_is_right_aligned() {
        let banner = format_operation_banner(Operation::VectorSum);
        assert_eq!(banner.len(), 50);
        assert!(banner.ends_with("--- Vector Sum ---"));
    }

    #[test]
    fn size_header_text() {
        let opts = SweepOptions::default();
        assert_eq!(
            format_size_header(Operation::VectorSum, 10, &opts),
            ">>> For an array of length 10 (avg. time for 5 tests and 1000 threads)"
        );
        assert_eq!(
            format_size_header(Operation::MatrixAddition, 100, &opts),
            ">>> For two square matrices of size 100 (avg. time for 5 tests and 1000 threads)"
        );
    }

    #[test]
    fn average_line_layout() {
        assert_eq!(
            format_average("threads", 1_500_000),
            "threads                  : 1500000ns (1.500000ms)"
        );
    }

    #[test]
    fn json_report_is_parseable() {
        let opts = SweepOptions {
            sizes: 1,
            start_size: 4,
            workers: 2,
            runs: 1,
            ..SweepOptions::default()
        };
        let report = run_operation(
            Operation::MatrixAddition,
            &opts,
            &[Strategy::ForkJoin],
            false,
            &NullPresenter,
        )
        .unwrap();
        let mut buf = Vec::new();
        write_json(&mut buf, &[report]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["operation"], "matrix-addition");
        assert_eq!(value[0]["sizes"][0]["size"], 4);
        assert_eq!(value[0]["sizes"][0]["measurements"][0]["strategy"], "fork-join");
        assert!(value[0]["sizes"][0]["measurements"][0]["error"].is_null());
    }
}
