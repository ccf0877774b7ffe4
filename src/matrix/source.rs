//! Matrix sources: whitespace-separated text files and random fill.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::buffer::{Element, Matrix};
use crate::error::{Error, Result};

/// Random elements are drawn from `0..RANDOM_BOUND`.
pub const RANDOM_BOUND: Element = 10;

impl Matrix {
    /// Reads a `rows × cols` matrix from a text file of whitespace-separated
    /// integers in row-major order.
    ///
    /// Line breaks carry no meaning; only the first `rows * cols` integers are
    /// used and anything after them is ignored.
    pub fn from_file(path: impl AsRef<Path>, rows: usize, cols: usize) -> Result<Self> {
        let path = path.as_ref();
        let expected = Matrix::checked_len(rows, cols)?;
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut data = Vec::with_capacity(expected);
        for token in text.split_whitespace().take(expected) {
            let value = token.parse::<Element>().map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                token: token.to_string(),
                source,
            })?;
            data.push(value);
        }

        if data.len() < expected {
            return Err(Error::MissingData {
                path: path.to_path_buf(),
                expected,
                found: data.len(),
            });
        }

        debug!(path = %path.display(), rows, cols, "loaded matrix");
        Matrix::from_vec(rows, cols, data)
    }

    /// Fills a `rows × cols` matrix with values in `0..10` drawn from `rng`.
    ///
    /// Panics like [`Matrix::zeros`] if the shape overflows.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let mut m = Matrix::zeros(rows, cols);
        for value in m.as_mut_slice() {
            *value = rng.gen_range(0..RANDOM_BOUND);
        }
        m
    }

    /// Same as [`Matrix::random`] with a reproducible seed.
    pub fn random_seeded(rows: usize, cols: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Matrix::random(rows, cols, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_file_ignores_line_layout() {
        let file = write_temp("1 2\n3\n4 5 6\n");
        let m = Matrix::from_file(file.path(), 2, 3).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_from_file_extra_values_ignored() {
        let file = write_temp("1 2 3 4 99 oops");
        let m = Matrix::from_file(file.path(), 2, 2).unwrap();
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_from_file_negative_values() {
        let file = write_temp("-1 0\n7 -8");
        let m = Matrix::from_file(file.path(), 2, 2).unwrap();
        assert_eq!(m.as_slice(), &[-1, 0, 7, -8]);
    }

    #[test]
    fn test_from_file_short() {
        let file = write_temp("1 2 3");
        let err = Matrix::from_file(file.path(), 2, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingData {
                expected: 4,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_from_file_malformed() {
        let file = write_temp("1 x 3 4");
        let err = Matrix::from_file(file.path(), 2, 2).unwrap_err();
        assert!(matches!(err, Error::Parse { ref token, .. } if token == "x"));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Matrix::from_file(dir.path().join("A.txt"), 1, 1).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_from_file_overflowing_shape() {
        let file = write_temp("1 2 3 4");
        let err = Matrix::from_file(file.path(), usize::MAX, 2).unwrap_err();
        assert!(matches!(err, Error::TooLarge { .. }));
    }

    #[test]
    fn test_random_bounds_and_seed() {
        let a = Matrix::random_seeded(8, 9, 42);
        let b = Matrix::random_seeded(8, 9, 42);
        assert_eq!(a, b);
        assert_eq!(a.shape(), (8, 9));
        assert!(a.as_slice().iter().all(|v| (0..RANDOM_BOUND).contains(v)));
    }
}
