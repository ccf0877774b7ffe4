//! Row-wise partitioning.

use super::{Partition, band};

/// Worker `index` of `count` takes `ceil(m / count)` whole rows starting at
/// `index * ceil(m / count)`, clamped to `m`.
///
/// When `count` does not divide `m` the trailing workers may start past the
/// last row; they get an empty partition at row `m`.
///
/// ```
/// use matmul_strategies::partition::row_partition;
///
/// // 10 rows over 4 workers: 3, 3, 3, 1
/// let last = row_partition(3, 4, 10, 6);
/// assert_eq!((last.row_start, last.row_end), (9, 10));
/// assert_eq!((last.col_start, last.col_end), (0, 6));
/// ```
pub fn row_partition(index: usize, count: usize, m: usize, p: usize) -> Partition {
    Partition::new(band(index, count, m), 0..p)
}
