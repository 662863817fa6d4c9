//! Fast Doubling engines for single-word Fibonacci values.
//!
//! Uses the doubling identities:
//!   F(2n)   = F(n) * (2*F(n+1) - F(n))
//!   F(2n+1) = F(n)^2 + F(n+1)^2
//!
//! Iterates from the highest set bit of k down to bit 0. The three public
//! engines differ only in how the bit width of k is found and in which
//! [`Multiplier`] forms the products.

use crate::engine::FibEngine;
use crate::multiply::{Multiplier, NativeMultiplier, ShiftAddMultiplier};

/// How the doubling loop finds the bit width of k.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitScan {
    /// Count bits by shifting k right until it reaches zero.
    Shift,
    /// Derive the width from the leading-zero count of k.
    LeadingZeros,
}

impl BitScan {
    /// Number of significant bits in `k`; zero when `k == 0`.
    #[must_use]
    pub fn bit_width(self, k: u64) -> u32 {
        match self {
            Self::Shift => {
                let mut width = 0;
                let mut rest = k;
                while rest != 0 {
                    width += 1;
                    rest >>= 1;
                }
                width
            }
            Self::LeadingZeros => u64::BITS - k.leading_zeros(),
        }
    }
}

/// One doubling step: from (F(n), F(n+1)) to (F(2n), F(2n+1)).
#[inline]
pub fn doubling_step<M: Multiplier + ?Sized>(m: &M, a: u64, b: u64) -> (u64, u64) {
    let t = m.multiply(2, b).wrapping_sub(a);
    let c = m.multiply(a, t);
    let d = m.square(a).wrapping_add(m.square(b));
    (c, d)
}

/// Fast Doubling engine parameterized by multiplier and bit scan.
#[derive(Debug, Clone, Copy)]
pub struct FastDoubling<M> {
    multiplier: M,
    scan: BitScan,
    name: &'static str,
}

impl FastDoubling<NativeMultiplier> {
    /// Shift bit scan with hardware multiply.
    #[must_use]
    pub const fn native() -> Self {
        Self::new(NativeMultiplier, BitScan::Shift, "FastDoublingNative")
    }

    /// Leading-zero bit scan with hardware multiply.
    #[must_use]
    pub const fn clz() -> Self {
        Self::new(NativeMultiplier, BitScan::LeadingZeros, "FastDoublingClz")
    }
}

impl FastDoubling<ShiftAddMultiplier> {
    /// Shift bit scan with shift-add multiply.
    #[must_use]
    pub const fn shift_add() -> Self {
        Self::new(ShiftAddMultiplier, BitScan::Shift, "FastDoublingShiftAdd")
    }
}

impl<M: Multiplier> FastDoubling<M> {
    #[must_use]
    pub const fn new(multiplier: M, scan: BitScan, name: &'static str) -> Self {
        Self {
            multiplier,
            scan,
            name,
        }
    }

    /// The bit scan this engine uses.
    #[must_use]
    pub fn scan(&self) -> BitScan {
        self.scan
    }

    /// Execute the doubling loop.
    fn execute_doubling_loop(&self, k: u64) -> u64 {
        let num_bits = self.scan.bit_width(k);
        // F(0) = 0, F(1) = 1
        let (mut a, mut b) = (0u64, 1u64);

        // k == 0 gives num_bits == 0: the range is empty and a stays 0
        for i in (0..num_bits).rev() {
            let (c, d) = doubling_step(&self.multiplier, a, b);
            if (k >> i) & 1 == 1 {
                a = d;
                b = c.wrapping_add(d);
            } else {
                a = c;
                b = d;
            }
        }

        a
    }
}

impl<M: Multiplier> FibEngine for FastDoubling<M> {
    fn compute(&self, k: u64) -> u64 {
        self.execute_doubling_loop(k)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
