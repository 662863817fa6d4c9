//! Iterative addition engine.
//!
//! Keeps only the last two terms. The wide variant runs the same
//! recurrence on [`BigInt128`] so values past F(93) keep their carry.

use crate::bign::BigInt128;
use crate::engine::FibEngine;

/// `F(i) = F(i-1) + F(i-2)` from the seeds F(0) = 0, F(1) = 1.
///
/// # Example
/// ```
/// use fibdrv_core::additive::AdditionDp;
/// use fibdrv_core::FibEngine;
///
/// assert_eq!(AdditionDp.compute(30), 832_040);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditionDp;

impl FibEngine for AdditionDp {
    fn compute(&self, k: u64) -> u64 {
        let (mut prev, mut cur) = (0u64, 1u64);
        if k == 0 {
            return prev;
        }
        for _ in 2..=k {
            let next = cur.wrapping_add(prev);
            prev = std::mem::replace(&mut cur, next);
        }
        cur
    }

    fn compute_wide(&self, k: u64) -> BigInt128 {
        let (mut prev, mut cur) = (BigInt128::ZERO, BigInt128::from(1u64));
        if k == 0 {
            return prev;
        }
        for _ in 2..=k {
            let next = BigInt128::add(cur, prev);
            prev = std::mem::replace(&mut cur, next);
        }
        cur
    }

    fn name(&self) -> &'static str {
        "AdditionDp"
    }
}
