#![no_main]

use libfuzzer_sys::fuzz_target;

use chunkbench_core::{Matrix, MatrixMultiplication, Strategy, VectorSum, WorkerBudget, Workload};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let Ok(budget) = WorkerBudget::new(usize::from(data[0]).max(1)) else {
        return;
    };
    let values: Vec<i64> = data[1..]
        .chunks(8)
        .map(|c| c.iter().fold(0i64, |acc, &b| (acc << 8) | i64::from(b)))
        .collect();

    let sum = VectorSum::new(values.clone(), budget);
    let expected = sum.sequential();
    for strategy in Strategy::ALL {
        assert_eq!(sum.compute(strategy), Ok(expected));
    }

    // Square up the values into n x n operands
    let n = (values.len() as f64).sqrt() as usize;
    let Ok(a) = Matrix::from_vec(n, n, values[..n * n].to_vec()) else {
        return;
    };
    let mul = MatrixMultiplication::new(a.clone(), a, budget).unwrap();
    let expected = mul.sequential();
    for strategy in Strategy::ALL {
        assert_eq!(mul.compute(strategy).unwrap(), expected);
    }
});
