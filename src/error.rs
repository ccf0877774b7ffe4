//! Error types for matrix loading, partitioning and multiplication.

use std::path::PathBuf;

use thiserror::Error;

use crate::partition::Strategy;

#[derive(Debug, Error)]
pub enum Error {
    #[error("matrix dimension mismatch: A is {a_rows}x{a_cols}, B is {b_rows}x{b_cols}")]
    ShapeMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },

    #[error("output buffer is {got:?}, expected {expected:?}")]
    OutputShape {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    #[error(
        "{strategy} partitions do not tile the output: {uncovered} cells uncovered, {contested} cells contested"
    )]
    PartitionOverlapHazard {
        strategy: Strategy,
        uncovered: usize,
        contested: usize,
    },

    #[error("rows have unequal length: row {row} has {found} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("a {rows}x{cols} matrix is too large to address")]
    TooLarge { rows: usize, cols: usize },

    #[error("matrix data has {found} elements, expected {expected}")]
    DataLength { expected: usize, found: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid integer {token:?} in {path}: {source}")]
    Parse {
        path: PathBuf,
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{path} holds {found} integers, expected {expected}")]
    MissingData {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("worker {0} panicked")]
    WorkerPanicked(usize),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
