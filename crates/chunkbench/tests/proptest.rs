//! Property-based tests for the application configuration.

use clap::Parser;
use proptest::prelude::*;

use chunkbench_lib::config::AppConfig;
use chunkbench_lib::errors::handle_error;
use chunkbench_orchestration::selection::{operations_to_run, strategies_to_run};
use chunkbench_orchestration::sweep_sizes;

const STRATEGIES: [&str; 4] = ["threads", "fork-join", "worker-pool", "stream"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn parsed_flags_reach_sweep_options(
        sizes in 1usize..10,
        start in 0usize..1000,
        workers in 1usize..5000,
        runs in 1u32..20,
        seed in any::<u64>(),
    ) {
        let args = [
            "chunkbench".to_string(),
            format!("--sizes={sizes}"),
            format!("--start-size={start}"),
            format!("--workers={workers}"),
            format!("--runs={runs}"),
            format!("--seed={seed}"),
        ];
        let opts = AppConfig::try_parse_from(args).unwrap().sweep_options();
        prop_assert_eq!(opts.workers, workers);
        prop_assert_eq!(opts.runs, runs);
        prop_assert_eq!(opts.seed, seed);
        let swept = sweep_sizes(&opts);
        prop_assert_eq!(swept.len(), sizes);
        prop_assert_eq!(swept[0], start);
    }

    #[test]
    fn strategy_lists_keep_order(picks in proptest::collection::vec(0usize..4, 1..8)) {
        let spec = picks.iter().map(|&i| STRATEGIES[i]).collect::<Vec<_>>().join(",");
        let selected = strategies_to_run(&spec).unwrap();
        let mut expected: Vec<&str> = Vec::new();
        for &i in &picks {
            if !expected.contains(&STRATEGIES[i]) {
                expected.push(STRATEGIES[i]);
            }
        }
        let names: Vec<&str> = selected.iter().map(|s| s.as_str()).collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn unknown_names_map_to_config_exit(name in "[a-z]{3,8}") {
        prop_assume!(!["all", "threads", "stream"].contains(&name.as_str()));
        if let Err(err) = operations_to_run(&name) {
            prop_assert_eq!(handle_error(&err), 4);
        }
    }
}
