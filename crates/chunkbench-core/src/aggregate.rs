//! Leaf kernels and merge steps shared by every strategy.
//!
//! All arithmetic wraps on overflow so that every strategy, whatever order it
//! combines partial results in, produces the same bits as the sequential
//! definition.

use crate::matrix::Matrix;
use crate::partition::Block;

/// Wrapping sum of a slice.
#[must_use]
pub fn wrapping_sum(values: &[i64]) -> i64 {
    values.iter().fold(0, |acc, &v| acc.wrapping_add(v))
}

/// Wrapping sum of partial results.
pub fn combine_sums(partials: impl IntoIterator<Item = i64>) -> i64 {
    partials.into_iter().fold(0, |acc, v| acc.wrapping_add(v))
}

/// `out[i] = a[i] + b[i]`, wrapping.
pub fn add_into(out: &mut [i64], a: &[i64], b: &[i64]) {
    debug_assert!(out.len() == a.len() && out.len() == b.len());
    for ((dst, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *dst = x.wrapping_add(y);
    }
}

/// Wrapping dot product of two equally long slices.
#[must_use]
pub fn dot(a: &[i64], b: &[i64]) -> i64 {
    a.iter()
        .zip(b)
        .fold(0, |acc, (&x, &y)| acc.wrapping_add(x.wrapping_mul(y)))
}

/// Fill `segment` with row `row` of `a * b`, for columns starting at
/// `col_start`. `b_t` is `b` transposed, so each cell is a dot product of two
/// contiguous rows.
pub fn product_row_into(
    segment: &mut [i64],
    a: &Matrix,
    b_t: &Matrix,
    row: usize,
    col_start: usize,
) {
    let lhs = a.row(row);
    for (offset, dst) in segment.iter_mut().enumerate() {
        *dst = dot(lhs, b_t.row(col_start + offset));
    }
}

/// Fill a full-width band of product rows starting at `first_row`.
pub fn multiply_rows_into(band: &mut [i64], a: &Matrix, b_t: &Matrix, first_row: usize) {
    let cols = b_t.rows();
    if cols == 0 {
        return;
    }
    for (offset, row) in band.chunks_mut(cols).enumerate() {
        product_row_into(row, a, b_t, first_row + offset, 0);
    }
}

/// Write the sum of `a` and `b` over `block` into `segments`, one segment
/// per block row.
pub fn add_block(segments: &mut [&mut [i64]], a: &Matrix, b: &Matrix, block: Block) {
    if block.is_empty() {
        return;
    }
    debug_assert_eq!(segments.len(), block.height());
    for (segment, r) in segments.iter_mut().zip(block.rows()) {
        let cols = block.cols();
        add_into(segment, &a.row(r)[cols.clone()], &b.row(r)[cols]);
    }
}

/// Write the product of `a` and `b` over `block` into `segments`.
pub fn multiply_block(segments: &mut [&mut [i64]], a: &Matrix, b_t: &Matrix, block: Block) {
    if block.is_empty() {
        return;
    }
    debug_assert_eq!(segments.len(), block.height());
    for (segment, r) in segments.iter_mut().zip(block.rows()) {
        product_row_into(segment, a, b_t, r, block.col_start);
    }
}

/// Owned result of one full-width row band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub row_start: usize,
    pub values: Vec<i64>,
}

/// Copy owned row bands into `output`. Every band must be full width.
pub fn stitch_bands(output: &mut Matrix, bands: impl IntoIterator<Item = Band>) {
    let cols = output.cols();
    let data = output.as_mut_slice();
    for band in bands {
        let start = band.row_start * cols;
        data[start..start + band.values.len()].copy_from_slice(&band.values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_wraps() {
        assert_eq!(wrapping_sum(&[i64::MAX, 1]), i64::MIN);
        assert_eq!(wrapping_sum(&[]), 0);
        assert_eq!(combine_sums([i64::MAX, 1, -1]), i64::MAX);
    }

    #[test]
    fn add_into_elementwise() {
        let mut out = [0; 3];
        add_into(&mut out, &[1, 2, 3], &[10, 20, i64::MAX]);
        assert_eq!(out, [11, 22, i64::MAX.wrapping_add(3)]);
    }

    #[test]
    fn dot_product() {
        assert_eq!(dot(&[1, 2, 3], &[4, 5, 6]), 32);
        assert_eq!(dot(&[], &[]), 0);
    }

    #[test]
    fn multiply_block_matches_definition() {
        let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
        let b_t = b.transpose();
        let mut out = Matrix::zeros(2, 2);
        {
            let mut segments = out.row_bands_mut(&[Block::new(0..1, 0..2), Block::new(1..2, 0..2)]);
            multiply_block(&mut segments, &a, &b_t, Block::full(2, 2));
        }
        assert_eq!(out.to_rows(), vec![vec![19, 22], vec![43, 50]]);
    }

    #[test]
    fn multiply_rows_into_band() {
        let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        let b_t = Matrix::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let mut band = [0; 4];
        multiply_rows_into(&mut band, &a, &b_t, 1);
        assert_eq!(band, [3, 4, 5, 6]);
    }

    #[test]
    fn empty_block_is_a_no_op() {
        let a = Matrix::zeros(3, 0);
        let mut segments: Vec<&mut [i64]> = Vec::new();
        add_block(&mut segments, &a, &a, Block::full(3, 0));
        multiply_block(&mut segments, &a, &a, Block::full(3, 0));
    }

    #[test]
    fn add_block_on_sub_region() {
        let a = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let b = Matrix::from_rows(vec![vec![1, 1, 1], vec![1, 1, 1]]).unwrap();
        let mut left = [0; 2];
        let mut right = [0; 2];
        {
            let mut segments: Vec<&mut [i64]> = vec![&mut left[..], &mut right[..]];
            add_block(&mut segments, &a, &b, Block::new(0..2, 1..3));
        }
        assert_eq!(left, [3, 4]);
        assert_eq!(right, [6, 7]);
    }

    #[test]
    fn stitch_places_bands() {
        let mut out = Matrix::zeros(3, 2);
        stitch_bands(
            &mut out,
            [
                Band { row_start: 2, values: vec![5, 6] },
                Band { row_start: 0, values: vec![1, 2, 3, 4] },
            ],
        );
        assert_eq!(out.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }
}
