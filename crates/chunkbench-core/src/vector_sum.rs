//! Sum of a vector of integers.

use std::sync::Arc;

use tracing::debug;

use crate::aggregate::{combine_sums, wrapping_sum};
use crate::lifecycle::Invocation;
use crate::partition::{chunk_ranges, threshold, WorkerBudget};
use crate::split_tree::SplitTree;
use crate::strategy::Strategy;
use crate::workload::{ComputeError, Workload};
use crate::{fork_join, pool, stream, threads};

/// Wrapping sum of an immutable input vector.
#[derive(Debug, Clone)]
pub struct VectorSum {
    values: Arc<[i64]>,
    budget: WorkerBudget,
    threshold: usize,
}

impl VectorSum {
    /// Store `values` and precompute the split threshold for `budget`.
    ///
    /// # Example
    /// ```
    /// use chunkbench_core::{Strategy, VectorSum, WorkerBudget, Workload};
    ///
    /// let sum = VectorSum::new(vec![1; 10], WorkerBudget::new(3).unwrap());
    /// assert_eq!(sum.compute(Strategy::ForkJoin).unwrap(), 10);
    /// ```
    pub fn new(values: impl Into<Arc<[i64]>>, budget: WorkerBudget) -> Self {
        let values = values.into();
        let threshold = threshold(values.len(), budget);
        Self {
            values,
            budget,
            threshold,
        }
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Leaf size limit for the divide-and-conquer split.
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Workload for VectorSum {
    type Output = i64;

    fn name(&self) -> &'static str {
        "vector-sum"
    }

    fn budget(&self) -> WorkerBudget {
        self.budget
    }

    fn problem_size(&self) -> usize {
        self.values.len()
    }

    fn sequential(&self) -> i64 {
        wrapping_sum(&self.values)
    }

    fn run(&self, strategy: Strategy, invocation: &mut Invocation<'_>) -> Result<i64, ComputeError> {
        let len = self.values.len();
        match strategy {
            Strategy::Threads => {
                let chunks = chunk_ranges(len, self.budget);
                debug!(len, chunks = chunks.len(), "vector sum: thread per chunk");
                let values = &self.values;
                let partials = threads::map_units(chunks, invocation, |range| {
                    wrapping_sum(&values[range])
                })?;
                Ok(combine_sums(partials))
            }
            Strategy::ForkJoin => {
                let tree = SplitTree::linear(len, self.threshold);
                fork_join::reduce(
                    &tree,
                    self.budget,
                    invocation,
                    |range| wrapping_sum(&self.values[range.clone()]),
                    i64::wrapping_add,
                )
            }
            Strategy::WorkerPool => {
                let tasks: Vec<_> = chunk_ranges(len, self.budget)
                    .into_iter()
                    .map(|range| {
                        let values = Arc::clone(&self.values);
                        move || wrapping_sum(&values[range])
                    })
                    .collect();
                debug!(len, tasks = tasks.len(), "vector sum: worker pool");
                let partials = pool::run_tasks(self.budget.get(), tasks, invocation)?;
                Ok(combine_sums(partials))
            }
            Strategy::Stream => stream::sum(&self.values, invocation),
        }
    }
}
