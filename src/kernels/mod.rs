//! The multiplication kernel shared by every execution strategy.
//!
//! Both the single-threaded path and each worker thread end up in
//! [`naive_ijk::dot`], so any exact cover of the output produces results
//! bit-identical to a full single-threaded run.
//!
//! Elements are `i32` and overflow wraps (`wrapping_mul`, `wrapping_add`)
//! in every build profile.

pub mod naive_ijk;

pub use naive_ijk::{dot, multiply_region, multiply_segment};
