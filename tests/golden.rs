//! Golden file integration tests.
//!
//! Reads tests/testdata/scenarios_golden.json and verifies every strategy
//! produces the known result for each listed worker budget.

use serde::Deserialize;

use chunkbench_core::{
    Matrix, MatrixAddition, MatrixMultiplication, Strategy, VectorSum, WorkerBudget, Workload,
};
use chunkbench_orchestration::interfaces::NullPresenter;
use chunkbench_orchestration::{run_operation, Operation, SweepOptions};

// ---------------------------------------------------------------------------
// Golden data structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    vector_sums: Vec<VectorCase>,
    matrix_additions: Vec<AdditionCase>,
    matrix_products: Vec<ProductCase>,
}

#[derive(Deserialize)]
struct VectorCase {
    values: Vec<i64>,
    workers: Vec<usize>,
    sum: i64,
}

#[derive(Deserialize)]
struct AdditionCase {
    a: Vec<Vec<i64>>,
    b: Vec<Vec<i64>>,
    workers: Vec<usize>,
    sum: Vec<Vec<i64>>,
}

#[derive(Deserialize)]
struct ProductCase {
    a: Vec<Vec<i64>>,
    b: Vec<Vec<i64>>,
    workers: Vec<usize>,
    product: Vec<Vec<i64>>,
}

fn load_golden_data() -> GoldenData {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/testdata/scenarios_golden.json"
    );
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

fn budget(t: usize) -> WorkerBudget {
    WorkerBudget::new(t).unwrap()
}

fn matrix(rows: &[Vec<i64>]) -> Matrix {
    Matrix::from_rows(rows.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Golden checks
// ---------------------------------------------------------------------------

#[test]
fn golden_vector_sums() {
    let data = load_golden_data();
    for case in &data.vector_sums {
        for &t in &case.workers {
            let sum = VectorSum::new(case.values.clone(), budget(t));
            assert_eq!(sum.sequential(), case.sum);
            for strategy in Strategy::ALL {
                assert_eq!(
                    sum.compute(strategy),
                    Ok(case.sum),
                    "{strategy} T={t} values={:?}",
                    case.values
                );
            }
        }
    }
}

#[test]
fn golden_matrix_additions() {
    let data = load_golden_data();
    for case in &data.matrix_additions {
        let expected = matrix(&case.sum);
        for &t in &case.workers {
            let add = MatrixAddition::new(matrix(&case.a), matrix(&case.b), budget(t)).unwrap();
            for strategy in Strategy::ALL {
                assert_eq!(add.compute(strategy).unwrap(), expected, "{strategy} T={t}");
            }
        }
    }
}

#[test]
fn golden_matrix_products() {
    let data = load_golden_data();
    for case in &data.matrix_products {
        let expected = matrix(&case.product);
        for &t in &case.workers {
            let mul =
                MatrixMultiplication::new(matrix(&case.a), matrix(&case.b), budget(t)).unwrap();
            for strategy in Strategy::ALL {
                assert_eq!(mul.compute(strategy).unwrap(), expected, "{strategy} T={t}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Sweep checks
// ---------------------------------------------------------------------------

fn small_sweep(workers: usize) -> SweepOptions {
    SweepOptions {
        sizes: 2,
        start_size: 6,
        growth: 3,
        workers,
        runs: 2,
        upper_bound: 10,
        seed: 42,
    }
}

#[test]
fn sweep_reports_every_operation_consistent() {
    for operation in Operation::ALL {
        let report = run_operation(
            operation,
            &small_sweep(4),
            &Strategy::ALL,
            true,
            &NullPresenter,
        )
        .unwrap();
        assert_eq!(report.sizes.len(), 2);
        assert_eq!(report.sizes[1].size, 18);
        for size in &report.sizes {
            assert!(size.consistent, "{operation} size {}", size.size);
            // baseline plus four strategies
            assert_eq!(size.measurements.len(), 5);
            assert!(size.measurements.iter().all(|m| m.durations_ns.len() == 2));
        }
        assert!(report.status().is_ok());
    }
}

#[test]
fn sweep_report_serializes() {
    let report = run_operation(
        Operation::VectorSum,
        &small_sweep(1000),
        &[Strategy::Threads, Strategy::Stream],
        false,
        &NullPresenter,
    )
    .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["operation"], "vector-sum");
    assert_eq!(json["workers"], 1000);
    assert_eq!(json["sizes"][0]["measurements"][0]["strategy"], "threads");
    assert!(json["sizes"][0]["measurements"][0]["error"].is_null());
}

#[test]
fn zero_worker_sweep_is_rejected() {
    let result = run_operation(
        Operation::MatrixAddition,
        &small_sweep(0),
        &Strategy::ALL,
        false,
        &NullPresenter,
    );
    assert!(matches!(result, Err(chunkbench_core::ComputeError::Config(_))));
}
