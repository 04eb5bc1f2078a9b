//! Dense row-major integer matrix.

use std::fmt;
use std::mem;
use std::ops::Range;

use crate::partition::Block;
use crate::workload::ComputeError;

/// Rectangular grid of `i64`, stored row-major.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Build from row-major data; `data.len()` must equal `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<i64>) -> Result<Self, ComputeError> {
        if data.len() != rows * cols {
            return Err(ComputeError::Config(format!(
                "matrix data has {} elements, expected {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows, rejecting ragged input.
    ///
    /// # Example
    /// ```
    /// use chunkbench_core::matrix::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// assert_eq!(m.get(1, 0), 3);
    /// assert!(Matrix::from_rows(vec![vec![1], vec![2, 3]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, ComputeError> {
        let cols = rows.first().map_or(0, Vec::len);
        let height = rows.len();
        let mut data = Vec::with_capacity(height * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(ComputeError::Config(format!(
                    "ragged matrix: row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: height,
            cols,
            data,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    /// Row `r` as a slice.
    #[must_use]
    pub fn row(&self, r: usize) -> &[i64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Consecutive rows as one contiguous slice.
    #[must_use]
    pub fn row_span(&self, rows: Range<usize>) -> &[i64] {
        &self.data[rows.start * self.cols..rows.end * self.cols]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [i64] {
        &mut self.data
    }

    /// Copy out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Transposed copy.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for (c, &value) in self.row(r).iter().enumerate() {
                out.data[c * self.rows + r] = value;
            }
        }
        out
    }

    /// Split the storage into one mutable band per block.
    ///
    /// `blocks` must be consecutive full-width row bands starting at row 0,
    /// as produced by `partition::row_blocks`.
    pub fn row_bands_mut(&mut self, blocks: &[Block]) -> Vec<&mut [i64]> {
        let cols = self.cols;
        let mut rest = self.data.as_mut_slice();
        let mut bands = Vec::with_capacity(blocks.len());
        for block in blocks {
            debug_assert_eq!(block.width(), cols, "row band must span every column");
            let (band, tail) = mem::take(&mut rest).split_at_mut(block.height() * cols);
            bands.push(band);
            rest = tail;
        }
        bands
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() <= 64 {
            f.debug_list()
                .entries((0..self.rows).map(|r| self.row(r)))
                .finish()
        } else {
            write!(f, "Matrix({}x{})", self.rows, self.cols)
        }
    }
}
