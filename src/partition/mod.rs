//! Work partitioning for the threaded runner.
//!
//! Every strategy is a pure function of `(index, count, m, p)` returning the
//! half-open rectangle of output cells worker `index` of `count` computes.
//!
//! | Strategy | Function | Tiles exactly? |
//! |----------|----------|----------------|
//! | [`Strategy::Row`] | [`row_partition`] | Yes |
//! | [`Strategy::Column`] | [`column_partition`] | Yes |
//! | [`Strategy::Block`] | [`block_partition`] | No, see [`block`] |
//! | [`Strategy::Grid`] | [`grid_partition`] | Yes |
//!
//! All of them panic when `count == 0`; the runner rejects that earlier
//! with [`crate::Error::InvalidWorkerCount`].

pub mod block;
pub mod column;
pub mod grid;
pub mod plan;
pub mod row;

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

pub use block::block_partition;
pub use column::column_partition;
pub use grid::{grid_partition, grid_shape};
pub use plan::{Claim, Coverage, Plan};
pub use row::row_partition;

/// Half-open rectangle `[row_start, row_end) × [col_start, col_end)` of
/// output cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Partition {
    /// Builds a partition from row and column ranges. A reversed range is
    /// collapsed to an empty one at its start.
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Partition {
            row_start: rows.start,
            row_end: rows.end.max(rows.start),
            col_start: cols.start,
            col_end: cols.end.max(cols.start),
        }
    }

    /// The whole `m × p` output.
    pub fn full(m: usize, p: usize) -> Self {
        Partition::new(0..m, 0..p)
    }

    pub fn rows(&self) -> Range<usize> {
        self.row_start..self.row_end
    }

    pub fn cols(&self) -> Range<usize> {
        self.col_start..self.col_end
    }

    pub fn is_empty(&self) -> bool {
        self.row_start == self.row_end || self.col_start == self.col_end
    }

    /// Number of output cells inside the rectangle.
    pub fn cell_count(&self) -> usize {
        (self.row_end - self.row_start) * (self.col_end - self.col_start)
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.rows().contains(&i) && self.cols().contains(&j)
    }

    /// True when both rectangles share at least one cell.
    pub fn overlaps(&self, other: &Partition) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.row_start < other.row_end
            && other.row_start < self.row_end
            && self.col_start < other.col_end
            && other.col_start < self.col_end
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..{} cols {}..{}",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}

/// Splits `[0, len)` into `count` bands of `ceil(len / count)` and returns
/// band `index`. Bands past the end are empty at `len`.
pub(crate) fn band(index: usize, count: usize, len: usize) -> Range<usize> {
    assert!(count > 0, "worker count must be at least 1");
    let per_worker = len.div_ceil(count);
    let start = index.saturating_mul(per_worker).min(len);
    let end = start.saturating_add(per_worker).min(len);
    start..end
}

/// How the output index space is divided among workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Contiguous bands of whole rows.
    Row,
    /// Contiguous bands of whole columns.
    Column,
    /// The square-block formula, reproduced with its tiling gaps.
    Block,
    /// Opt-in corrected 2D tiling.
    Grid,
}

impl Strategy {
    /// The three strategies the benchmark harness compares.
    pub const COMPARED: [Strategy; 3] = [Strategy::Row, Strategy::Column, Strategy::Block];

    pub const ALL: [Strategy; 4] = [
        Strategy::Row,
        Strategy::Column,
        Strategy::Block,
        Strategy::Grid,
    ];

    /// Partition for worker `index` of `count` over an `m × p` output.
    pub fn partition(self, index: usize, count: usize, m: usize, p: usize) -> Partition {
        match self {
            Strategy::Row => row_partition(index, count, m, p),
            Strategy::Column => column_partition(index, count, m, p),
            Strategy::Block => block_partition(index, count, m, p),
            Strategy::Grid => grid_partition(index, count, m, p),
        }
    }

    /// True for strategies whose partitions always tile the output exactly.
    pub fn is_exact(self) -> bool {
        !matches!(self, Strategy::Block)
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Row => "row",
            Strategy::Column => "column",
            Strategy::Block => "block",
            Strategy::Grid => "grid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "row" | "rows" => Ok(Strategy::Row),
            "column" | "col" | "cols" => Ok(Strategy::Column),
            "block" => Ok(Strategy::Block),
            "grid" => Ok(Strategy::Grid),
            _ => Err(format!("unknown strategy: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_even_split() {
        assert_eq!(band(0, 4, 8), 0..2);
        assert_eq!(band(3, 4, 8), 6..8);
    }

    #[test]
    fn test_band_clamps_last() {
        // ceil(10 / 4) = 3: 0..3, 3..6, 6..9, 9..10
        assert_eq!(band(2, 4, 10), 6..9);
        assert_eq!(band(3, 4, 10), 9..10);
    }

    #[test]
    fn test_band_excess_workers_empty() {
        // ceil(5 / 4) = 2: worker 3 starts at 6 > 5
        assert_eq!(band(3, 4, 5), 5..5);
        assert_eq!(band(7, 8, 3), 3..3);
    }

    #[test]
    fn test_band_huge_len() {
        assert_eq!(band(3, 4, usize::MAX), 3 * (1usize << (usize::BITS - 2))..usize::MAX);
    }

    #[test]
    fn test_band_zero_len() {
        assert_eq!(band(0, 3, 0), 0..0);
        assert_eq!(band(2, 3, 0), 0..0);
    }

    #[test]
    #[should_panic]
    fn test_band_zero_workers() {
        band(0, 0, 4);
    }

    #[test]
    fn test_partition_overlaps() {
        let a = Partition::new(0..2, 0..2);
        let b = Partition::new(1..3, 1..3);
        let c = Partition::new(2..4, 0..2);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&Partition::new(0..0, 0..2)));
    }

    #[test]
    fn test_partition_reversed_range_is_empty() {
        let part = Partition::new(3..1, 0..2);
        assert!(part.is_empty());
        assert_eq!(part.cell_count(), 0);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Row".parse::<Strategy>().unwrap(), Strategy::Row);
        assert_eq!("col".parse::<Strategy>().unwrap(), Strategy::Column);
        assert_eq!("grid".parse::<Strategy>().unwrap(), Strategy::Grid);
        assert!("diagonal".parse::<Strategy>().is_err());
    }
}
