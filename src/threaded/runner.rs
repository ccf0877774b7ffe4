//! Spawn-and-join runner for one parallel multiplication.

use std::thread;

use tracing::{debug, warn};

use super::task::{WorkerTask, carve};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::partition::{Coverage, Plan, Strategy};

/// Checks `A.cols == B.rows` and that C is `A.rows × B.cols`.
pub(crate) fn check_shapes(a: &Matrix, b: &Matrix, c: &Matrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(Error::ShapeMismatch {
            a_rows: a.rows(),
            a_cols: a.cols(),
            b_rows: b.rows(),
            b_cols: b.cols(),
        });
    }
    let expected = (a.rows(), b.cols());
    if c.shape() != expected {
        return Err(Error::OutputShape {
            expected,
            got: c.shape(),
        });
    }
    Ok(())
}

/// Computes C = A × B with `config.workers` threads partitioned by
/// `strategy`.
///
/// Exactly `config.workers` scoped threads are spawned, including those
/// whose partition is empty, and all are joined before returning. The
/// returned [`Coverage`] reports cells no worker computed; those keep the
/// value C held on entry.
///
/// Cells claimed by several workers are computed once, by the lowest-index
/// claimant. In strict mode any plan that is not an exact tiling is
/// rejected before a thread is spawned.
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] / [`Error::OutputShape`] for incompatible shapes
/// - [`Error::InvalidWorkerCount`] when `config.workers == 0`
/// - [`Error::PartitionOverlapHazard`] in strict mode
/// - [`Error::WorkerPanicked`] if a worker thread panicked
pub fn run(
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    strategy: Strategy,
    config: &RunConfig,
) -> Result<Coverage> {
    check_shapes(a, b, c)?;
    config.validate()?;

    let (m, p) = c.shape();
    let plan = Plan::new(strategy, config.workers, m, p);
    let (tasks, coverage) = carve(&plan, a, b, c);
    debug_assert!(!strategy.is_exact() || coverage.is_exact());

    if !coverage.is_exact() {
        if config.strict {
            return Err(Error::PartitionOverlapHazard {
                strategy,
                uncovered: coverage.uncovered,
                contested: coverage.contested,
            });
        }
        warn!(
            %strategy,
            workers = config.workers,
            m,
            p,
            uncovered = coverage.uncovered,
            contested = coverage.contested,
            "partitions do not tile the output; uncovered cells keep their previous value"
        );
    }

    dispatch(tasks)?;
    Ok(coverage)
}

/// Runs every task on its own scoped thread and joins all of them, even
/// after one has panicked. The lowest-index panicking worker is reported.
fn dispatch(tasks: Vec<WorkerTask<'_, '_>>) -> Result<()> {
    let failed = thread::scope(|s| {
        let handles: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                debug!(
                    worker = task.index,
                    partition = %task.partition,
                    cells = task.cell_count(),
                    "dispatching worker"
                );
                s.spawn(move || task.run())
            })
            .collect();

        let mut failed = None;
        for (index, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && failed.is_none() {
                failed = Some(index);
            }
        }
        failed
    });

    match failed {
        Some(index) => Err(Error::WorkerPanicked(index)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Matrix, Matrix) {
        let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
        (a, b)
    }

    #[test]
    fn test_row_and_column_two_by_two() {
        let (a, b) = sample();
        for strategy in [Strategy::Row, Strategy::Column] {
            for workers in 1..=4 {
                let mut c = Matrix::zeros(2, 2);
                let coverage = run(&a, &b, &mut c, strategy, &RunConfig::with_workers(workers))
                    .unwrap();
                assert!(coverage.is_exact());
                assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
            }
        }
    }

    #[test]
    fn test_zero_workers_rejected() {
        let (a, b) = sample();
        let mut c = Matrix::zeros(2, 2);
        let err = run(&a, &b, &mut c, Strategy::Row, &RunConfig::with_workers(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidWorkerCount(0)));
    }

    #[test]
    fn test_output_shape_checked() {
        let (a, b) = sample();
        let mut c = Matrix::zeros(3, 2);
        let err = run(&a, &b, &mut c, Strategy::Row, &RunConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::OutputShape {
                expected: (2, 2),
                got: (3, 2)
            }
        ));
    }

    #[test]
    fn test_block_holes_keep_previous_values() {
        let a = Matrix::random_seeded(4, 3, 7);
        let b = Matrix::random_seeded(3, 4, 8);
        let mut c = Matrix::zeros(4, 4);
        c.fill(-1);

        let coverage = run(&a, &b, &mut c, Strategy::Block, &RunConfig::with_workers(4)).unwrap();
        assert_eq!(coverage.uncovered, 12);
        for i in 0..4 {
            assert_eq!(c.get(i, 0), crate::kernels::dot(&a, &b, i, 0));
            for j in 1..4 {
                assert_eq!(c.get(i, j), -1);
            }
        }
    }

    #[test]
    fn test_strict_rejects_before_writing() {
        let (a, b) = sample();
        let mut c = Matrix::zeros(2, 2);
        c.fill(5);
        let config = RunConfig {
            workers: 2,
            strict: true,
        };
        let err = run(&a, &b, &mut c, Strategy::Block, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::PartitionOverlapHazard {
                strategy: Strategy::Block,
                uncovered: 2,
                contested: 0
            }
        ));
        assert!(c.as_slice().iter().all(|&v| v == 5));
    }

    #[test]
    fn test_strict_allows_exact_plans() {
        let (a, b) = sample();
        let mut c = Matrix::zeros(2, 2);
        let config = RunConfig {
            workers: 4,
            strict: true,
        };
        assert!(run(&a, &b, &mut c, Strategy::Block, &config).is_ok());
        assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
    }

    #[test]
    fn test_panicking_worker_is_reported() {
        // B is one column narrower than the plan expects, so only the
        // worker owning column 1 indexes past its end.
        let a = Matrix::from_rows(vec![vec![1], vec![2]]).unwrap();
        let b = Matrix::from_rows(vec![vec![3]]).unwrap();
        let mut c = Matrix::zeros(2, 2);
        c.fill(-1);

        let plan = Plan::new(Strategy::Column, 2, 2, 2);
        let (tasks, _) = carve(&plan, &a, &b, &mut c);
        let err = dispatch(tasks).unwrap_err();
        assert!(matches!(err, Error::WorkerPanicked(1)));

        // The healthy worker still ran to completion
        assert_eq!(c.to_rows(), vec![vec![3, -1], vec![6, -1]]);
    }
}
