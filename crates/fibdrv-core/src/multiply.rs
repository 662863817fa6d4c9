//! 64-bit multiplication strategies.
//!
//! `Multiplier` is the narrow interface the doubling loop multiplies
//! through. Both strategies wrap modulo 2^64 and agree on every input.

/// Narrow interface for 64-bit multiply/square.
pub trait Multiplier: Send + Sync {
    /// Multiply two words, wrapping on overflow.
    fn multiply(&self, a: u64, b: u64) -> u64;

    /// Square a word.
    fn square(&self, a: u64) -> u64 {
        self.multiply(a, a)
    }

    /// Get the name of this multiplication strategy.
    fn name(&self) -> &'static str;
}

/// Hardware multiply.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeMultiplier;

impl Multiplier for NativeMultiplier {
    #[inline]
    fn multiply(&self, a: u64, b: u64) -> u64 {
        a.wrapping_mul(b)
    }

    fn name(&self) -> &'static str {
        "Native"
    }
}

/// Binary long multiplication: for every set bit `p` of the multiplier,
/// add `multiplicand << p` to the accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftAddMultiplier;

impl Multiplier for ShiftAddMultiplier {
    fn multiply(&self, a: u64, b: u64) -> u64 {
        let mut acc = 0u64;
        let mut rest = b;
        let mut shift = 0u32;
        while rest != 0 {
            if rest & 1 == 1 {
                acc = acc.wrapping_add(a << shift);
            }
            rest >>= 1;
            shift += 1;
        }
        acc
    }

    fn name(&self) -> &'static str {
        "ShiftAdd"
    }
}
