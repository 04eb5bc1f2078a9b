//! Data-parallel iterators on the global rayon pool.
//!
//! No chunk bookkeeping happens here; rayon's adaptive splitting chooses the
//! granularity.

use rayon::prelude::*;

use crate::lifecycle::{Invocation, Phase};
use crate::matrix::Matrix;
use crate::workload::{catch_worker_panic, ComputeError};

/// Wrapping sum of `values` as a parallel fold/reduce.
pub fn sum(values: &[i64], invocation: &mut Invocation<'_>) -> Result<i64, ComputeError> {
    invocation.advance(Phase::Dispatched);
    invocation.advance(Phase::Running);
    let total = catch_worker_panic(|| {
        values
            .par_iter()
            .fold(|| 0i64, |acc, &v| acc.wrapping_add(v))
            .reduce(|| 0, i64::wrapping_add)
    })?;
    invocation.advance(Phase::Joined);
    Ok(total)
}

/// Fill every row of `output` in parallel; `row_fn` receives the row index
/// and that row's storage.
pub fn fill_rows<F>(
    output: &mut Matrix,
    invocation: &mut Invocation<'_>,
    row_fn: F,
) -> Result<(), ComputeError>
where
    F: Fn(usize, &mut [i64]) + Sync,
{
    invocation.advance(Phase::Dispatched);
    invocation.advance(Phase::Running);
    let cols = output.cols();
    if cols > 0 {
        let data = output.as_mut_slice();
        catch_worker_panic(|| {
            data.par_chunks_mut(cols)
                .enumerate()
                .for_each(|(r, row)| row_fn(r, row));
        })?;
    }
    invocation.advance(Phase::Joined);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::NoOpObserver;
    use crate::strategy::Strategy;

    #[test]
    fn sum_matches_sequential() {
        let values: Vec<i64> = (0..10_000).collect();
        let mut invocation = Invocation::start(Strategy::Stream, &NoOpObserver);
        assert_eq!(sum(&values, &mut invocation), Ok(49_995_000));
    }

    #[test]
    fn sum_of_nothing() {
        let mut invocation = Invocation::start(Strategy::Stream, &NoOpObserver);
        assert_eq!(sum(&[], &mut invocation), Ok(0));
        assert_eq!(invocation.phase(), Phase::Joined);
    }

    #[test]
    fn fill_rows_writes_each_row() {
        let mut m = Matrix::zeros(3, 2);
        let mut invocation = Invocation::start(Strategy::Stream, &NoOpObserver);
        fill_rows(&mut m, &mut invocation, |r, row| {
            row.fill(i64::try_from(r).unwrap());
        })
        .unwrap();
        assert_eq!(m.as_slice(), &[0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn fill_rows_zero_width() {
        let mut m = Matrix::zeros(4, 0);
        let mut invocation = Invocation::start(Strategy::Stream, &NoOpObserver);
        assert!(fill_rows(&mut m, &mut invocation, |_, _| unreachable!()).is_ok());
    }

    #[test]
    fn fill_rows_panic_becomes_error() {
        let mut m = Matrix::zeros(6, 3);
        let mut invocation = Invocation::start(Strategy::Stream, &NoOpObserver);
        let result = fill_rows(&mut m, &mut invocation, |r, row| {
            assert!(r != 4, "row 4 failed");
            row.fill(1);
        });
        assert_eq!(
            result,
            Err(ComputeError::WorkerPanicked("row 4 failed".into()))
        );
        assert_eq!(invocation.phase(), Phase::Running);
    }
}
