//! Per-run partition plans and their coverage of the output.

use super::{Partition, Strategy};

/// All partitions of one multiplication, indexed by worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    m: usize,
    p: usize,
    partitions: Vec<Partition>,
}

/// How a plan's partitions cover the `m × p` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coverage {
    /// Total output cells.
    pub cells: usize,
    /// Cells no worker computes. They keep whatever C held before the run.
    pub uncovered: usize,
    /// Cells claimed by more than one worker.
    pub contested: usize,
}

/// Ownership of one output cell within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Claim {
    /// Lowest-index worker whose partition contains the cell.
    pub owner: Option<usize>,
    /// Number of partitions containing the cell.
    pub claimants: u32,
}

impl Coverage {
    /// Every cell is computed exactly once.
    pub fn is_exact(&self) -> bool {
        self.uncovered == 0 && self.contested == 0
    }
}

impl Plan {
    /// Partitions for `workers` workers over an `m × p` output.
    pub fn new(strategy: Strategy, workers: usize, m: usize, p: usize) -> Self {
        let partitions = (0..workers)
            .map(|index| strategy.partition(index, workers, m, p))
            .collect();
        Plan { m, p, partitions }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.m, self.p)
    }

    pub fn workers(&self) -> usize {
        self.partitions.len()
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Records, for each cell of row `row`, how many workers claim it and
    /// which one owns it: the lowest-index claimant.
    ///
    /// `claims` must hold `p` entries and is overwritten. Returns the number
    /// of cells in the row claimed more than once.
    pub fn claim_row(&self, row: usize, claims: &mut [Claim]) -> usize {
        debug_assert_eq!(claims.len(), self.p);
        claims.fill(Claim::default());

        let mut contested = 0;
        for (worker, part) in self.partitions.iter().enumerate() {
            if !part.rows().contains(&row) {
                continue;
            }
            for claim in &mut claims[part.cols()] {
                claim.claimants += 1;
                match claim.claimants {
                    1 => claim.owner = Some(worker),
                    2 => contested += 1,
                    _ => {}
                }
            }
        }
        contested
    }

    /// Counts uncovered and contested cells.
    pub fn coverage(&self) -> Coverage {
        let mut coverage = Coverage {
            cells: self.m * self.p,
            ..Coverage::default()
        };
        if coverage.cells == 0 {
            return coverage;
        }
        let mut claims = vec![Claim::default(); self.p];
        for row in 0..self.m {
            coverage.contested += self.claim_row(row, &mut claims);
            coverage.uncovered += claims.iter().filter(|c| c.owner.is_none()).count();
        }
        coverage
    }
}
