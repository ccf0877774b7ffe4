//! Column-wise partitioning.

use super::{Partition, band};

/// Mirror of [`super::row_partition`] on the column axis: worker `index`
/// takes `ceil(p / count)` whole columns, clamped to `p`, across all `m`
/// rows.
pub fn column_partition(index: usize, count: usize, m: usize, p: usize) -> Partition {
    Partition::new(0..m, band(index, count, p))
}
