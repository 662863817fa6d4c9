//! # fibdrv-core
//!
//! Numeric core of the fibdrv service: four interchangeable Fibonacci
//! engines for the bounded index domain `0..=92`, the multiplication
//! strategies they are built on, and a 128-bit carry-aware integer used by
//! the wide result layout.

pub mod additive;
pub mod bign;
pub mod constants;
pub mod engine;
pub mod fastdoubling;
pub mod multiply;
pub mod registry;

// Re-exports
pub use bign::BigInt128;
pub use constants::{exit_codes, FIB_TABLE, MAX_INDEX, MAX_WIDE_INDEX};
pub use engine::{Algorithm, EngineError, FibEngine};
pub use multiply::{Multiplier, NativeMultiplier, ShiftAddMultiplier};
pub use registry::{engine_for, lookup};

/// Compute F(k) with the default engine (`AdditionDp`).
///
/// Intended for quick use and tests. The result is only meaningful for
/// `k <= MAX_INDEX`.
///
/// # Example
/// ```
/// assert_eq!(fibdrv_core::fibonacci(10), 55);
/// assert_eq!(fibdrv_core::fibonacci(0), 0);
/// ```
#[must_use]
pub fn fibonacci(k: u64) -> u64 {
    engine_for(Algorithm::default()).compute(k)
}
