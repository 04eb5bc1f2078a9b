//! Element-wise sum of two equally shaped matrices.
//!
//! Every strategy writes straight into disjoint regions of a fresh output
//! matrix, except the worker pool whose `'static` tasks return owned row
//! bands that are stitched in afterwards.

use std::sync::Arc;

use tracing::debug;

use crate::aggregate::{add_block, add_into, stitch_bands, Band};
use crate::lifecycle::Invocation;
use crate::matrix::Matrix;
use crate::partition::{row_blocks, threshold, Block, WorkerBudget};
use crate::split_tree::SplitTree;
use crate::strategy::Strategy;
use crate::workload::{ComputeError, Workload};
use crate::{fork_join, pool, stream, threads};

/// `C = A + B` over immutable inputs.
#[derive(Debug, Clone)]
pub struct MatrixAddition {
    a: Arc<Matrix>,
    b: Arc<Matrix>,
    budget: WorkerBudget,
    threshold: usize,
}

impl MatrixAddition {
    /// Store both operands; their shapes must match.
    pub fn new(
        a: impl Into<Arc<Matrix>>,
        b: impl Into<Arc<Matrix>>,
        budget: WorkerBudget,
    ) -> Result<Self, ComputeError> {
        let (a, b) = (a.into(), b.into());
        if a.shape() != b.shape() {
            return Err(ComputeError::Config(format!(
                "cannot add a {}x{} matrix to a {}x{} matrix",
                a.rows(),
                a.cols(),
                b.rows(),
                b.cols()
            )));
        }
        let threshold = threshold(a.len(), budget);
        Ok(Self {
            a,
            b,
            budget,
            threshold,
        })
    }

    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    fn add_band(&self, block: Block, band: &mut [i64]) {
        add_into(band, self.a.row_span(block.rows()), self.b.row_span(block.rows()));
    }
}

impl Workload for MatrixAddition {
    type Output = Matrix;

    fn name(&self) -> &'static str {
        "matrix-addition"
    }

    fn budget(&self) -> WorkerBudget {
        self.budget
    }

    fn problem_size(&self) -> usize {
        self.a.len()
    }

    fn sequential(&self) -> Matrix {
        let (rows, cols) = self.a.shape();
        let mut out = Matrix::zeros(rows, cols);
        add_into(out.as_mut_slice(), self.a.as_slice(), self.b.as_slice());
        out
    }

    fn run(
        &self,
        strategy: Strategy,
        invocation: &mut Invocation<'_>,
    ) -> Result<Matrix, ComputeError> {
        let (rows, cols) = self.a.shape();
        let mut out = Matrix::zeros(rows, cols);
        match strategy {
            Strategy::Threads => {
                let blocks = row_blocks(rows, cols, self.budget);
                debug!(rows, cols, bands = blocks.len(), "matrix addition: thread per chunk");
                let bands = out.row_bands_mut(&blocks);
                let units: Vec<(Block, &mut [i64])> = blocks.iter().copied().zip(bands).collect();
                threads::map_units(units, invocation, |(block, band)| self.add_band(block, band))?;
            }
            Strategy::ForkJoin => {
                let tree = SplitTree::quad(rows, cols, self.threshold);
                let mut segments = tree.carve(&mut out);
                fork_join::for_each_leaf(
                    &tree,
                    &mut segments,
                    self.budget,
                    invocation,
                    |block, segs| add_block(segs, &self.a, &self.b, *block),
                )?;
            }
            Strategy::WorkerPool => {
                let tasks: Vec<_> = row_blocks(rows, cols, self.budget)
                    .into_iter()
                    .map(|block| {
                        let a = Arc::clone(&self.a);
                        let b = Arc::clone(&self.b);
                        move || {
                            let mut values = vec![0; block.area()];
                            add_into(&mut values, a.row_span(block.rows()), b.row_span(block.rows()));
                            Band {
                                row_start: block.row_start,
                                values,
                            }
                        }
                    })
                    .collect();
                debug!(rows, cols, tasks = tasks.len(), "matrix addition: worker pool");
                let bands = pool::run_tasks(self.budget.get(), tasks, invocation)?;
                stitch_bands(&mut out, bands);
            }
            Strategy::Stream => {
                stream::fill_rows(&mut out, invocation, |r, row| {
                    add_into(row, self.a.row(r), self.b.row(r));
                })?;
            }
        }
        Ok(out)
    }
}
