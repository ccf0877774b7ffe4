//! Integer matrix multiplication with comparable threading strategies.
//!
//! The product C = A × B is computed single-threaded or by a fixed number
//! of worker threads, each owning one partition of C. The interesting part
//! is how the output is split:
//!
//! - **Row-wise**: bands of `ceil(m / workers)` rows
//! - **Column-wise**: bands of `ceil(p / workers)` columns
//! - **Block-wise**: the square-block formula, kept with its tiling gaps
//! - **Grid**: an opt-in 2D tiling that always covers C exactly
//!
//! ## Usage
//!
//! ```
//! use matmul_strategies::{Matrix, Strategy, multiply_parallel, multiply_single_threaded};
//!
//! let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
//!
//! let c = multiply_single_threaded(&a, &b).unwrap();
//! assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
//!
//! let c_rows = multiply_parallel(&a, &b, Strategy::Row, 4).unwrap();
//! assert_eq!(c, c_rows);
//! ```
//!
//! ## What's inside
//!
//! - `matrix`: row-major storage, file and random sources
//! - `partition`: per-worker ranges for each strategy, coverage analysis
//! - `kernels`: the i-j-k dot-product kernel every path shares
//! - `threaded`: carving C into disjoint views, spawn and join
//! - `harness`: timing the strategies against each other

pub mod config;
pub mod error;
pub mod harness;
pub mod kernels;
pub mod matrix;
pub mod partition;
pub mod threaded;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use matrix::{Element, Matrix};
pub use partition::{Coverage, Partition, Strategy};

/// C = A × B on the calling thread.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] if `A.cols != B.rows`, [`Error::TooLarge`] if
/// C would not be addressable.
pub fn multiply_single_threaded(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let mut c = Matrix::try_zeros(a.rows(), b.cols())?;
    multiply_into(a, b, &mut c)?;
    Ok(c)
}

/// Same as [`multiply_single_threaded`] but writes into an existing C,
/// overwriting every cell.
pub fn multiply_into(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
    threaded::check_shapes(a, b, c)?;
    let (m, p) = c.shape();
    kernels::multiply_region(a, b, c, &Partition::full(m, p));
    Ok(())
}

/// C = A × B using `workers` threads partitioned by `strategy`.
///
/// C starts zeroed, so with [`Strategy::Block`] any cell the blocks miss
/// stays 0; use [`multiply_parallel_into`] to see the [`Coverage`].
pub fn multiply_parallel(
    a: &Matrix,
    b: &Matrix,
    strategy: Strategy,
    workers: usize,
) -> Result<Matrix> {
    let mut c = Matrix::try_zeros(a.rows(), b.cols())?;
    multiply_parallel_into(a, b, &mut c, strategy, &RunConfig::with_workers(workers))?;
    Ok(c)
}

/// Parallel multiply into an existing C. See [`threaded::run`].
pub fn multiply_parallel_into(
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    strategy: Strategy,
    config: &RunConfig,
) -> Result<Coverage> {
    threaded::run(a, b, c, strategy, config)
}
