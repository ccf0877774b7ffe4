//! Corrected 2D tiling.
//!
//! The workers are arranged as a `grid_rows × grid_cols` grid, with
//! `grid_rows` the largest divisor of the worker count not above its square
//! root. Rows and columns are then split exactly like the row-wise and
//! column-wise strategies, so the tiles always cover the output once.

use super::{Partition, band};

/// `(grid_rows, grid_cols)` for `count` workers, `grid_rows <= grid_cols`.
///
/// ```
/// use matmul_strategies::partition::grid_shape;
///
/// assert_eq!(grid_shape(4), (2, 2));
/// assert_eq!(grid_shape(6), (2, 3));
/// assert_eq!(grid_shape(7), (1, 7));
/// ```
pub fn grid_shape(count: usize) -> (usize, usize) {
    assert!(count > 0, "worker count must be at least 1");
    let mut rows = 1;
    let mut d = 1;
    while d * d <= count {
        if count % d == 0 {
            rows = d;
        }
        d += 1;
    }
    (rows, count / rows)
}

/// Tile assigned to worker `index` of `count` over an `m × p` output.
pub fn grid_partition(index: usize, count: usize, m: usize, p: usize) -> Partition {
    let (grid_rows, grid_cols) = grid_shape(count);
    Partition::new(
        band(index / grid_cols, grid_rows, m),
        band(index % grid_cols, grid_cols, p),
    )
}
