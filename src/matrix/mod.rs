//! Matrix storage and the sources that populate it.
//!
//! [`Matrix`] is the only data structure the kernels and runners touch.
//! Loading from text files and random generation live in `source`.

pub mod buffer;
pub mod source;

pub use buffer::{Element, Matrix};
