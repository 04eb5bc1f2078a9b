//! Random problem instances drawn from an explicit generator.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use chunkbench_core::{ComputeError, Matrix};

/// `len` values uniform in `[0, upper)`. `upper` is clamped to at least 1.
///
/// Fails with `ComputeError::Config` when `len` values cannot be allocated.
pub fn random_vector<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    upper: i64,
) -> Result<Vec<i64>, ComputeError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|e| ComputeError::Config(format!("cannot allocate {len} values: {e}")))?;
    let dist = Uniform::new(0, upper.max(1));
    values.extend(dist.sample_iter(rng).take(len));
    Ok(values)
}

/// A `rows x cols` matrix of values uniform in `[0, upper)`.
pub fn random_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    upper: i64,
) -> Result<Matrix, ComputeError> {
    let len = rows
        .checked_mul(cols)
        .ok_or_else(|| ComputeError::Config(format!("matrix of {rows}x{cols} is too large")))?;
    let data = random_vector(rng, len, upper)?;
    Matrix::from_vec(rows, cols, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn values_within_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let v = random_vector(&mut rng, 1000, 5).unwrap();
        assert_eq!(v.len(), 1000);
        assert!(v.iter().all(|&x| (0..5).contains(&x)));
    }

    #[test]
    fn same_seed_same_instance() {
        let a = random_matrix(&mut ChaCha8Rng::seed_from_u64(42), 4, 3, 100).unwrap();
        let b = random_matrix(&mut ChaCha8Rng::seed_from_u64(42), 4, 3, 100).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shape(), (4, 3));
    }

    #[test]
    fn upper_bound_of_one_gives_zeros() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(random_vector(&mut rng, 50, 1).unwrap().iter().all(|&x| x == 0));
        assert!(random_vector(&mut rng, 50, 0).unwrap().iter().all(|&x| x == 0));
    }

    #[test]
    fn oversized_matrix_is_config_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let side = usize::MAX / 2;
        assert!(matches!(
            random_matrix(&mut rng, side, side, 2),
            Err(ComputeError::Config(_))
        ));
    }

    #[test]
    fn oversized_vector_is_config_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(matches!(
            random_vector(&mut rng, usize::MAX, 2),
            Err(ComputeError::Config(_))
        ));
    }
}
