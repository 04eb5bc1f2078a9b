//! Matrix product `C = A x B`.
//!
//! Each output cell is owned by exactly one worker, which computes the full
//! inner-dimension dot product for it. `B` is transposed once at
//! construction so that every dot product walks two contiguous rows.

use std::sync::Arc;

use tracing::debug;

use crate::aggregate::{multiply_block, multiply_rows_into, product_row_into, stitch_bands, Band};
use crate::lifecycle::Invocation;
use crate::matrix::Matrix;
use crate::partition::{row_blocks, threshold, Block, WorkerBudget};
use crate::split_tree::SplitTree;
use crate::strategy::Strategy;
use crate::workload::{ComputeError, Workload};
use crate::{fork_join, pool, stream, threads};

/// `C = A x B` for an `n x k` left operand and a `k x m` right operand.
#[derive(Debug, Clone)]
pub struct MatrixMultiplication {
    a: Arc<Matrix>,
    b: Arc<Matrix>,
    b_t: Arc<Matrix>,
    budget: WorkerBudget,
    threshold: usize,
}

impl MatrixMultiplication {
    /// Store both operands; `a.cols()` must equal `b.rows()`.
    pub fn new(
        a: impl Into<Arc<Matrix>>,
        b: impl Into<Arc<Matrix>>,
        budget: WorkerBudget,
    ) -> Result<Self, ComputeError> {
        let (a, b) = (a.into(), b.into());
        if a.cols() != b.rows() {
            return Err(ComputeError::Config(format!(
                "cannot multiply a {}x{} matrix by a {}x{} matrix",
                a.rows(),
                a.cols(),
                b.rows(),
                b.cols()
            )));
        }
        let b_t = Arc::new(b.transpose());
        let threshold = threshold(a.rows() * b.cols(), budget);
        Ok(Self {
            a,
            b,
            b_t,
            budget,
            threshold,
        })
    }

    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Shape of the product.
    #[must_use]
    pub fn output_shape(&self) -> (usize, usize) {
        (self.a.rows(), self.b.cols())
    }
}

impl Workload for MatrixMultiplication {
    type Output = Matrix;

    fn name(&self) -> &'static str {
        "matrix-multiplication"
    }

    fn budget(&self) -> WorkerBudget {
        self.budget
    }

    fn problem_size(&self) -> usize {
        self.a.rows() * self.b.cols()
    }

    fn sequential(&self) -> Matrix {
        let (rows, cols) = self.output_shape();
        let inner = self.a.cols();
        let mut out = Matrix::zeros(rows, cols);
        for (i, row) in out.as_mut_slice().chunks_mut(cols.max(1)).enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..inner).fold(0i64, |acc, k| {
                    acc.wrapping_add(self.a.get(i, k).wrapping_mul(self.b.get(k, j)))
                });
            }
        }
        out
    }

    fn run(
        &self,
        strategy: Strategy,
        invocation: &mut Invocation<'_>,
    ) -> Result<Matrix, ComputeError> {
        let (rows, cols) = self.output_shape();
        let mut out = Matrix::zeros(rows, cols);
        match strategy {
            Strategy::Threads => {
                let blocks = row_blocks(rows, cols, self.budget);
                debug!(rows, cols, bands = blocks.len(), "matrix product: thread per chunk");
                let bands = out.row_bands_mut(&blocks);
                let units: Vec<(Block, &mut [i64])> = blocks.iter().copied().zip(bands).collect();
                threads::map_units(units, invocation, |(block, band)| {
                    multiply_rows_into(band, &self.a, &self.b_t, block.row_start);
                })?;
            }
            Strategy::ForkJoin => {
                let tree = SplitTree::quad(rows, cols, self.threshold);
                let mut segments = tree.carve(&mut out);
                fork_join::for_each_leaf(
                    &tree,
                    &mut segments,
                    self.budget,
                    invocation,
                    |block, segs| multiply_block(segs, &self.a, &self.b_t, *block),
                )?;
            }
            Strategy::WorkerPool => {
                let tasks: Vec<_> = row_blocks(rows, cols, self.budget)
                    .into_iter()
                    .map(|block| {
                        let a = Arc::clone(&self.a);
                        let b_t = Arc::clone(&self.b_t);
                        move || {
                            let mut values = vec![0; block.area()];
                            multiply_rows_into(&mut values, &a, &b_t, block.row_start);
                            Band {
                                row_start: block.row_start,
                                values,
                            }
                        }
                    })
                    .collect();
                debug!(rows, cols, tasks = tasks.len(), "matrix product: worker pool");
                let bands = pool::run_tasks(self.budget.get(), tasks, invocation)?;
                stitch_bands(&mut out, bands);
            }
            Strategy::Stream => {
                stream::fill_rows(&mut out, invocation, |r, row| {
                    product_row_into(row, &self.a, &self.b_t, r, 0);
                })?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(t: usize) -> WorkerBudget {
        WorkerBudget::new(t).unwrap()
    }

    fn matrix(rows: Vec<Vec<i64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn identity_times_ones() {
        let mul = MatrixMultiplication::new(
            matrix(vec![vec![1, 0], vec![0, 1]]),
            matrix(vec![vec![1, 1], vec![1, 1]]),
            budget(4),
        )
        .unwrap();
        let expected = matrix(vec![vec![1, 1], vec![1, 1]]);
        assert_eq!(mul.sequential(), expected);
        for strategy in Strategy::ALL {
            assert_eq!(mul.compute(strategy).unwrap(), expected, "{strategy}");
        }
    }

    #[test]
    fn rectangular_product() {
        // (2x3) x (3x2)
        let mul = MatrixMultiplication::new(
            matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]),
            matrix(vec![vec![7, 8], vec![9, 10], vec![11, 12]]),
            budget(3),
        )
        .unwrap();
        let expected = matrix(vec![vec![58, 64], vec![139, 154]]);
        assert_eq!(mul.output_shape(), (2, 2));
        for strategy in Strategy::ALL {
            assert_eq!(mul.compute(strategy).unwrap(), expected, "{strategy}");
        }
    }

    #[test]
    fn incompatible_shapes_rejected() {
        let result = MatrixMultiplication::new(Matrix::zeros(2, 3), Matrix::zeros(2, 3), budget(1));
        assert!(matches!(result, Err(ComputeError::Config(_))));
    }

    #[test]
    fn empty_inner_dimension_gives_zeros() {
        let mul =
            MatrixMultiplication::new(Matrix::zeros(3, 0), Matrix::zeros(0, 2), budget(2)).unwrap();
        for strategy in Strategy::ALL {
            assert_eq!(mul.compute(strategy).unwrap(), Matrix::zeros(3, 2), "{strategy}");
        }
    }

    #[test]
    fn zero_output_columns() {
        let mul =
            MatrixMultiplication::new(Matrix::zeros(4, 2), Matrix::zeros(2, 0), budget(2)).unwrap();
        assert_eq!(mul.sequential().shape(), (4, 0));
        for strategy in Strategy::ALL {
            assert_eq!(mul.compute(strategy).unwrap().shape(), (4, 0), "{strategy}");
        }
    }

    #[test]
    fn wrapping_dot_products_agree() {
        let a = Matrix::from_vec(2, 2, vec![i64::MAX, 2, 3, i64::MIN]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![2, i64::MAX, 5, 7]).unwrap();
        let mul = MatrixMultiplication::new(a, b, budget(2)).unwrap();
        let expected = mul.sequential();
        for strategy in Strategy::ALL {
            assert_eq!(mul.compute(strategy).unwrap(), expected, "{strategy}");
        }
    }
}
