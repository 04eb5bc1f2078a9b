//! Application configuration from CLI flags and environment.

use clap::{Parser, ValueEnum};

use chunkbench_core::constants::{
    DEFAULT_GROWTH, DEFAULT_RUNS, DEFAULT_SEED, DEFAULT_SIZE_COUNT, DEFAULT_START_SIZE,
    DEFAULT_UPPER_BOUND, DEFAULT_WORKER_BUDGET,
};
use chunkbench_orchestration::SweepOptions;

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report, printed while the sweep runs.
    Text,
    /// One JSON document on stdout once the sweep is done.
    Json,
}

/// chunkbench: benchmark chunked parallel vector and matrix operations.
#[derive(Parser, Debug)]
#[command(name = "chunkbench", version, about)]
pub struct AppConfig {
    /// Operations: all, or a comma-separated list of vector-sum, matrix-addition, matrix-multiplication.
    #[arg(long = "op", default_value = "all", env = "CHUNKBENCH_OP")]
    pub op: String,

    /// Strategies: all, or a comma-separated list of threads, fork-join, worker-pool, stream.
    #[arg(short, long, default_value = "all", env = "CHUNKBENCH_STRATEGY")]
    pub strategy: String,

    /// Number of problem sizes per operation.
    #[arg(long, default_value_t = DEFAULT_SIZE_COUNT, env = "CHUNKBENCH_SIZES")]
    pub sizes: usize,

    /// First problem size (vector length or matrix side).
    #[arg(long, default_value_t = DEFAULT_START_SIZE, env = "CHUNKBENCH_START_SIZE")]
    pub start_size: usize,

    /// Multiplier between consecutive sizes.
    #[arg(long, default_value_t = DEFAULT_GROWTH, env = "CHUNKBENCH_GROWTH")]
    pub growth: usize,

    /// Worker budget handed to every strategy.
    #[arg(short = 't', long, default_value_t = DEFAULT_WORKER_BUDGET, env = "CHUNKBENCH_WORKERS")]
    pub workers: usize,

    /// Timed repetitions per strategy and size.
    #[arg(short, long, default_value_t = DEFAULT_RUNS, env = "CHUNKBENCH_RUNS")]
    pub runs: u32,

    /// Exclusive upper bound of generated values.
    #[arg(long, default_value_t = DEFAULT_UPPER_BOUND, env = "CHUNKBENCH_UPPER_BOUND")]
    pub upper_bound: i64,

    /// Seed of the input generator.
    #[arg(long, default_value_t = DEFAULT_SEED, env = "CHUNKBENCH_SEED")]
    pub seed: u64,

    /// Also measure the single-threaded definition.
    #[arg(long)]
    pub baseline: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "CHUNKBENCH_FORMAT")]
    pub format: OutputFormat,

    /// Verbose output (list every run).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only label and average per strategy).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Sweep options with zero values replaced by defaults. A zero worker
    /// budget and a non-positive upper bound pass through unchanged and are
    /// rejected when the sweep starts.
    #[must_use]
    pub fn sweep_options(&self) -> SweepOptions {
        let workers = self.workers;
        let mut opts = SweepOptions {
            sizes: self.sizes,
            start_size: self.start_size,
            growth: self.growth,
            workers,
            runs: self.runs,
            upper_bound: self.upper_bound,
            seed: self.seed,
        }
        .normalize();
        opts.workers = workers;
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("chunkbench").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.op, "all");
        assert_eq!(config.strategy, "all");
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.sweep_options(), SweepOptions::default());
    }

    #[test]
    fn flags_map_to_sweep_options() {
        let config = parse(&[
            "--sizes", "2", "--start-size", "4", "--growth", "3", "-t", "8", "-r", "1",
            "--upper-bound", "9", "--seed", "17",
        ]);
        let opts = config.sweep_options();
        assert_eq!(opts.sizes, 2);
        assert_eq!(opts.start_size, 4);
        assert_eq!(opts.growth, 3);
        assert_eq!(opts.workers, 8);
        assert_eq!(opts.runs, 1);
        assert_eq!(opts.upper_bound, 9);
        assert_eq!(opts.seed, 17);
    }

    #[test]
    fn zero_workers_survives_normalization() {
        let config = parse(&["--workers", "0", "--runs", "0"]);
        let opts = config.sweep_options();
        assert_eq!(opts.workers, 0);
        assert_eq!(opts.runs, DEFAULT_RUNS);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = AppConfig::try_parse_from(["chunkbench", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn json_format() {
        assert_eq!(parse(&["--format", "json"]).format, OutputFormat::Json);
    }
}
