//! Block-wise partitioning.
//!
//! A single `block = ceil(m / count)` is used on both axes. Worker `index`
//! starts at the flat offset `index * block`:
//!
//! ```text
//! row_start = offset % m        row_end = min(row_start + block, m)
//! col_start = offset / m        col_end = min(col_start + block, p)
//! ```
//!
//! The column position is derived by dividing by `m`, so the blocks only
//! form a proper tiling for a few shapes (e.g. `m == p == 2` with 4 workers).
//! In general some cells belong to no block and some to two:
//!
//! - `m == p == 4`, 4 workers: `block = 1`, every block sits in column 0
//!   and 12 of 16 cells are never computed.
//! - `m == p == 4`, 3 workers: `block = 2`, workers 0 and 2 both claim
//!   cells `(0, 1)` and `(1, 1)`.
//!
//! The formula is kept as is so its timings compare with the other
//! strategies; [`super::Plan::coverage`] reports the gaps and
//! [`super::grid_partition`] is the corrected tiling.

use super::Partition;

/// Block assigned to worker `index` of `count` over an `m × p` output.
///
/// Returns an empty partition when `m == 0` or when the block's column
/// start falls at or past `p`.
///
/// # Panics
///
/// Panics if `count == 0`.
pub fn block_partition(index: usize, count: usize, m: usize, p: usize) -> Partition {
    assert!(count > 0, "worker count must be at least 1");
    if m == 0 {
        return Partition::new(0..0, 0..0);
    }

    let block = m.div_ceil(count);
    let offset = index.saturating_mul(block);

    let row_start = offset % m;
    let row_end = row_start.saturating_add(block).min(m);
    let col_start = (offset / m).min(p);
    let col_end = col_start.saturating_add(block).min(p);

    Partition::new(row_start..row_end, col_start..col_end)
}
