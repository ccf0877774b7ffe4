//! Worker tasks and the carving of C into disjoint writable views.

use crate::kernels::multiply_segment;
use crate::matrix::{Element, Matrix};
use crate::partition::{Claim, Coverage, Partition, Plan};

/// A run of consecutive cells in one row of C owned by a single worker.
#[derive(Debug)]
pub struct Segment<'c> {
    pub row: usize,
    pub col_start: usize,
    pub out: &'c mut [Element],
}

/// Everything one worker needs: its partition, the shared inputs and the
/// slices of C it alone may write.
#[derive(Debug)]
pub struct WorkerTask<'a, 'c> {
    pub index: usize,
    pub partition: Partition,
    a: &'a Matrix,
    b: &'a Matrix,
    segments: Vec<Segment<'c>>,
}

impl WorkerTask<'_, '_> {
    /// Number of cells this worker writes.
    pub fn cell_count(&self) -> usize {
        self.segments.iter().map(|s| s.out.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Runs the kernel over every owned segment.
    pub fn run(self) {
        for segment in self.segments {
            multiply_segment(self.a, self.b, segment.row, segment.col_start, segment.out);
        }
    }
}

/// Splits C into one task per worker of `plan`.
///
/// Each cell goes to the lowest-index worker whose partition contains it;
/// cells no partition contains are handed to nobody and keep their old
/// value. The borrow checker guarantees the resulting views are disjoint.
pub fn carve<'a, 'c>(
    plan: &Plan,
    a: &'a Matrix,
    b: &'a Matrix,
    c: &'c mut Matrix,
) -> (Vec<WorkerTask<'a, 'c>>, Coverage) {
    let (m, p) = plan.shape();
    debug_assert_eq!(c.shape(), (m, p));

    let mut tasks: Vec<WorkerTask<'a, 'c>> = plan
        .partitions()
        .iter()
        .enumerate()
        .map(|(index, &partition)| WorkerTask {
            index,
            partition,
            a,
            b,
            segments: Vec::new(),
        })
        .collect();

    let mut coverage = Coverage {
        cells: m * p,
        ..Coverage::default()
    };
    if m == 0 || p == 0 {
        return (tasks, coverage);
    }

    let mut claims = vec![Claim::default(); p];
    for (row, mut rest) in c.as_mut_slice().chunks_mut(p).enumerate() {
        coverage.contested += plan.claim_row(row, &mut claims);

        let mut col = 0;
        while col < p {
            let owner = claims[col].owner;
            let mut end = col + 1;
            while end < p && claims[end].owner == owner {
                end += 1;
            }

            let (out, tail) = std::mem::take(&mut rest).split_at_mut(end - col);
            rest = tail;
            match owner {
                Some(worker) => tasks[worker].segments.push(Segment {
                    row,
                    col_start: col,
                    out,
                }),
                None => coverage.uncovered += end - col,
            }
            col = end;
        }
    }

    (tasks, coverage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Strategy;

    #[test]
    fn test_row_tasks_own_whole_rows() {
        let a = Matrix::zeros(5, 2);
        let b = Matrix::zeros(2, 3);
        let mut c = Matrix::zeros(5, 3);
        let plan = Plan::new(Strategy::Row, 2, 5, 3);

        let (tasks, coverage) = carve(&plan, &a, &b, &mut c);
        assert!(coverage.is_exact());
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].cell_count(), 9);
        assert_eq!(tasks[1].cell_count(), 6);
        assert!(tasks[0].segments.iter().all(|s| s.col_start == 0 && s.out.len() == 3));
    }

    #[test]
    fn test_column_tasks_one_segment_per_row() {
        let a = Matrix::zeros(3, 1);
        let b = Matrix::zeros(1, 5);
        let mut c = Matrix::zeros(3, 5);
        let plan = Plan::new(Strategy::Column, 2, 3, 5);

        let (tasks, _) = carve(&plan, &a, &b, &mut c);
        assert_eq!(tasks[1].segments.len(), 3);
        assert!(tasks[1].segments.iter().all(|s| s.col_start == 3 && s.out.len() == 2));
    }

    #[test]
    fn test_excess_workers_get_empty_tasks() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 2);
        let mut c = Matrix::zeros(2, 2);
        let plan = Plan::new(Strategy::Row, 6, 2, 2);

        let (tasks, coverage) = carve(&plan, &a, &b, &mut c);
        assert_eq!(tasks.len(), 6);
        assert!(coverage.is_exact());
        assert!(tasks[2..].iter().all(|t| t.is_empty()));
    }

    #[test]
    fn test_block_coverage_matches_plan() {
        let a = Matrix::zeros(4, 1);
        let b = Matrix::zeros(1, 4);
        for workers in 1..=6 {
            let mut c = Matrix::zeros(4, 4);
            let plan = Plan::new(Strategy::Block, workers, 4, 4);
            let (tasks, coverage) = carve(&plan, &a, &b, &mut c);
            assert_eq!(coverage, plan.coverage(), "workers={workers}");

            let owned: usize = tasks.iter().map(|t| t.cell_count()).sum();
            assert_eq!(owned, coverage.cells - coverage.uncovered);
        }
    }
}
