//! Row-major integer matrix storage.

use std::fmt;

use crate::error::{Error, Result};

/// Element type of every matrix in this crate.
///
/// Products and sums wrap on overflow, see [`crate::kernels`].
pub type Element = i32;

/// A dense `rows × cols` grid of [`Element`]s stored row-major.
///
/// Element `(i, j)` lives at `data[i * cols + j]`, the same layout the
/// kernels and the threaded runner index into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Element>,
}

impl Matrix {
    /// Number of elements in a `rows × cols` matrix.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`] if `rows * cols` overflows `usize`.
    pub fn checked_len(rows: usize, cols: usize) -> Result<usize> {
        rows.checked_mul(cols).ok_or(Error::TooLarge { rows, cols })
    }

    /// Creates a zero-filled matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows. Use [`Matrix::try_zeros`] for
    /// shapes that come from user input.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::try_zeros(rows, cols).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Creates a zero-filled matrix, rejecting shapes whose element count
    /// overflows.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = Matrix::checked_len(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![0; len],
        })
    }

    /// Wraps an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Element>) -> Result<Self> {
        let expected = Matrix::checked_len(rows, cols)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                found: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from nested rows. Every row must have the same length.
    ///
    /// ```
    /// use matmul_strategies::Matrix;
    ///
    /// let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(a.shape(), (2, 2));
    /// assert_eq!(a.get(1, 0), 3);
    /// ```
    pub fn from_rows(rows: Vec<Vec<Element>>) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns element `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Element {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j]
    }

    /// Overwrites element `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Element) {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j] = value;
    }

    /// Row `i` as a slice of `cols` elements.
    #[inline]
    pub fn row(&self, i: usize) -> &[Element] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Mutable view of row `i`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [Element] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Element] {
        &mut self.data
    }

    pub fn fill(&mut self, value: Element) {
        self.data.fill(value);
    }

    /// Copies the matrix back into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Element>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }
}

/// One row per line, each value followed by a single space.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for value in self.row(i) {
                write!(f, "{} ", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
