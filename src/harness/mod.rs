//! Timing harness comparing the execution strategies.
//!
//! Every run writes into the same C buffer, one after the other, so a
//! strategy that leaves cells uncovered inherits the values of the run
//! before it. [`Timing::coverage`] says when that happened.

use std::fmt::{self, Write};
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::RunConfig;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::partition::{Coverage, Strategy};

/// What was timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    SingleThreaded,
    Threaded(Strategy),
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::SingleThreaded => f.write_str("Single-threaded"),
            Method::Threaded(Strategy::Row) => f.write_str("Row-wise threaded"),
            Method::Threaded(Strategy::Column) => f.write_str("Column-wise threaded"),
            Method::Threaded(Strategy::Block) => f.write_str("Block-wise threaded"),
            Method::Threaded(Strategy::Grid) => f.write_str("Grid threaded"),
        }
    }
}

/// Wall-clock cost of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub method: Method,
    pub elapsed: Duration,
    pub coverage: Coverage,
}

impl Timing {
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Times a single-threaded multiply into `c`.
pub fn time_single(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<Timing> {
    let start = Instant::now();
    crate::multiply_into(a, b, c)?;
    let elapsed = start.elapsed();

    info!(elapsed_s = elapsed.as_secs_f64(), "single-threaded run finished");
    Ok(Timing {
        method: Method::SingleThreaded,
        elapsed,
        coverage: Coverage {
            cells: c.rows() * c.cols(),
            ..Coverage::default()
        },
    })
}

/// Times one threaded run into `c`, thread spawn and join included.
pub fn time_strategy(
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    strategy: Strategy,
    config: &RunConfig,
) -> Result<Timing> {
    let start = Instant::now();
    let coverage = crate::threaded::run(a, b, c, strategy, config)?;
    let elapsed = start.elapsed();

    info!(
        %strategy,
        workers = config.workers,
        elapsed_s = elapsed.as_secs_f64(),
        "threaded run finished"
    );
    Ok(Timing {
        method: Method::Threaded(strategy),
        elapsed,
        coverage,
    })
}

/// Single-threaded first, then every strategy in `strategies`, all into
/// the same `c`.
pub fn run_all(
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    strategies: &[Strategy],
    config: &RunConfig,
) -> Result<Vec<Timing>> {
    let mut timings = Vec::with_capacity(strategies.len() + 1);
    timings.push(time_single(a, b, c)?);
    for &strategy in strategies {
        timings.push(time_strategy(a, b, c, strategy, config)?);
    }
    Ok(timings)
}

/// One line per run plus a speedup table relative to the first timing.
pub fn format_report(timings: &[Timing]) -> String {
    let mut out = String::new();
    for t in timings {
        let _ = writeln!(out, "{} multiplication took {:.6} seconds.", t.method, t.seconds());
    }

    let Some(baseline) = timings.first() else {
        return out;
    };

    let _ = writeln!(out, "\n{}", "=".repeat(64));
    let _ = writeln!(
        out,
        "{:<24} {:>12} {:>10} {:>14}",
        "Method", "Time (ms)", "Speedup", "Uncovered"
    );
    let _ = writeln!(out, "{}", "-".repeat(64));
    for t in timings {
        let speedup = if t.seconds() > 0.0 {
            baseline.seconds() / t.seconds()
        } else {
            f64::INFINITY
        };
        let _ = writeln!(
            out,
            "{:<24} {:>12.3} {:>9.2}× {:>14}",
            t.method.to_string(),
            t.seconds() * 1000.0,
            speedup,
            t.coverage.uncovered
        );
    }
    let _ = writeln!(out, "{}", "=".repeat(64));
    out
}
