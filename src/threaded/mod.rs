//! Multi-threaded execution.
//!
//! The runner owns `&mut C` for the duration of a call. It carves C into
//! disjoint row segments, one set per worker, and hands each worker only
//! its own segments. A and B are shared read-only. No locks and no
//! `unsafe` are involved.
//!
//! - `task`: [`WorkerTask`] and [`carve`]
//! - `runner`: [`run`], spawn and join

pub mod runner;
pub mod task;

pub(crate) use runner::check_shapes;
pub use runner::run;
pub use task::{Segment, WorkerTask, carve};
