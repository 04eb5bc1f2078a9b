//! Flat partition plans: worker budgets, thresholds, and contiguous chunks.
//!
//! The thread-per-chunk and worker-pool strategies hand each worker one
//! element of a flat plan. Chunks are `ceil(len / T)` long with the last one
//! clipped; chunks that would start past the end are never produced, so a
//! worker is never handed an empty range.

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::workload::ComputeError;

/// Upper bound on concurrent execution units for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerBudget(NonZeroUsize);

impl WorkerBudget {
    /// Create a budget, rejecting zero.
    pub fn new(workers: usize) -> Result<Self, ComputeError> {
        NonZeroUsize::new(workers)
            .map(Self)
            .ok_or_else(|| ComputeError::Config("worker budget must be at least 1".into()))
    }

    /// Number of workers.
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for WorkerBudget {
    type Error = ComputeError;

    fn try_from(workers: usize) -> Result<Self, Self::Error> {
        Self::new(workers)
    }
}

/// Size at or below which divide-and-conquer stops splitting.
///
/// `max(1, total / T)`, so an empty problem still gets a threshold of 1.
#[must_use]
pub fn threshold(total: usize, budget: WorkerBudget) -> usize {
    (total / budget.get()).max(1)
}

/// Chunk length for a flat plan over `len` elements: `ceil(len / T)`.
#[must_use]
pub fn chunk_size(len: usize, budget: WorkerBudget) -> usize {
    len.div_ceil(budget.get())
}

/// Split `0..len` into at most `T` contiguous non-empty chunks.
///
/// # Example
/// ```
/// use chunkbench_core::partition::{chunk_ranges, WorkerBudget};
///
/// let budget = WorkerBudget::new(3).unwrap();
/// assert_eq!(chunk_ranges(10, budget), vec![0..4, 4..8, 8..10]);
/// assert!(chunk_ranges(0, budget).is_empty());
/// ```
#[must_use]
pub fn chunk_ranges(len: usize, budget: WorkerBudget) -> Vec<Range<usize>> {
    let size = chunk_size(len, budget);
    if size == 0 {
        return Vec::new();
    }
    (0..budget.get())
        .map(|i| i * size)
        .take_while(|&start| start < len)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Rectangular region of a 2-D problem, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Block {
    /// Create a block from its row and column ranges.
    #[must_use]
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self {
            row_start: rows.start,
            row_end: rows.end,
            col_start: cols.start,
            col_end: cols.end,
        }
    }

    /// The whole `rows x cols` space.
    #[must_use]
    pub fn full(rows: usize, cols: usize) -> Self {
        Self::new(0..rows, 0..cols)
    }

    #[must_use]
    pub fn rows(&self) -> Range<usize> {
        self.row_start..self.row_end
    }

    #[must_use]
    pub fn cols(&self) -> Range<usize> {
        self.col_start..self.col_end
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }

    /// Number of cells covered.
    #[must_use]
    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Split at the midpoint of every dimension longer than one cell.
    ///
    /// Pieces are emitted top-left, top-right, bottom-left, bottom-right and
    /// empty pieces are skipped, so a 1-row block yields a left/right pair.
    pub fn quadrants(&self, mut emit: impl FnMut(Block)) {
        let row_cuts = midpoint_cuts(self.rows());
        let col_cuts = midpoint_cuts(self.cols());
        for rows in row_cuts.iter().flatten() {
            for cols in col_cuts.iter().flatten() {
                emit(Block::new(rows.clone(), cols.clone()));
            }
        }
    }
}

/// Halves of `range`, or the range itself when it is too short to split.
fn midpoint_cuts(range: Range<usize>) -> [Option<Range<usize>>; 2] {
    if range.len() < 2 {
        return [Some(range), None];
    }
    let mid = range.start + range.len() / 2;
    [Some(range.start..mid), Some(mid..range.end)]
}

/// Flat 2-D plan: full-width row bands, one per row chunk.
///
/// Empty when the space has no cells.
#[must_use]
pub fn row_blocks(rows: usize, cols: usize, budget: WorkerBudget) -> Vec<Block> {
    if cols == 0 {
        return Vec::new();
    }
    chunk_ranges(rows, budget)
        .into_iter()
        .map(|band| Block::new(band, 0..cols))
        .collect()
}
