//! Styled terminal lines of the text report: operation banners, the closing
//! verdict, and errors.

use console::style;

use chunkbench_orchestration::{Operation, OperationReport};

use crate::output::{format_number, format_operation_banner};

/// Whether `NO_COLOR` asks for plain output.
#[must_use]
pub fn color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Print the right-aligned title opening an operation's section.
pub fn print_operation_banner(operation: Operation) {
    let banner = format_operation_banner(operation);
    if color_disabled() {
        println!("{banner}");
    } else {
        println!("{}", style(banner).bold().cyan());
    }
}

/// Outcome counts of a finished sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepTally {
    /// Measurements taken, baseline included.
    pub measured: usize,
    /// Measurements aborted by an error.
    pub failed: usize,
    /// Problem sizes at which strategies produced different results.
    pub disagreements: usize,
}

impl SweepTally {
    #[must_use]
    pub fn of(reports: &[OperationReport]) -> Self {
        let mut tally = Self::default();
        for size in reports.iter().flat_map(|report| &report.sizes) {
            tally.measured += size.measurements.len();
            tally.failed += size.measurements.iter().filter(|m| !m.is_ok()).count();
            if !size.consistent {
                tally.disagreements += 1;
            }
        }
        tally
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.disagreements == 0
    }
}

/// Unstyled verdict text for `tally`.
#[must_use]
pub fn verdict_line(tally: SweepTally) -> String {
    let measured = format_number(u64::try_from(tally.measured).unwrap_or(u64::MAX));
    if tally.is_clean() {
        return format!("All strategies agree ({measured} measurements).");
    }
    let mut problems = Vec::new();
    if tally.failed > 0 {
        problems.push(format!("{} of {measured} measurements failed", tally.failed));
    }
    if tally.disagreements > 0 {
        problems.push(format!(
            "strategies disagree at {} problem size(s)",
            tally.disagreements
        ));
    }
    format!("{}.", problems.join("; "))
}

/// Print the closing verdict of a sweep, tagged `[OK]` or `[FAIL]`.
pub fn print_verdict(reports: &[OperationReport]) {
    let tally = SweepTally::of(reports);
    let line = verdict_line(tally);
    let tag = if tally.is_clean() { "[OK]" } else { "[FAIL]" };
    if color_disabled() {
        println!("{tag} {line}");
    } else if tally.is_clean() {
        println!("{} {line}", style(tag).green().bold());
    } else {
        println!("{} {line}", style(tag).red().bold());
    }
}

/// Print a failed measurement or a fatal error to stderr.
pub fn print_error(text: &str) {
    if color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}
