//! Engine trait and the algorithm selector.
//!
//! `FibEngine` is the contract shared by every algorithm. `Algorithm` is
//! the enumerated selector a device keeps; its opcode is the write length
//! that selects it.

use std::fmt;
use std::str::FromStr;

use crate::bign::BigInt128;

/// Error type for engine lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// No engine is registered under the given name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),
}

/// Computes F(k) with F(0) = 0 and F(1) = 1.
///
/// Results are defined for `k <= MAX_INDEX`. Larger indices wrap modulo
/// 2^64 and are never reported as errors.
pub trait FibEngine: Send + Sync {
    /// Compute F(k) as a single word.
    fn compute(&self, k: u64) -> u64;

    /// Compute F(k) in the 128-bit layout.
    fn compute_wide(&self, k: u64) -> BigInt128 {
        BigInt128::from(self.compute(k))
    }

    /// Get the name of this engine.
    fn name(&self) -> &'static str;
}

/// The four selectable engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Algorithm {
    /// Iterative addition.
    #[default]
    AdditionDp = 0,
    /// Fast doubling, shift bit scan, hardware multiply.
    FastDoublingNative = 1,
    /// Fast doubling, leading-zero bit scan, hardware multiply.
    FastDoublingClz = 2,
    /// Fast doubling, shift bit scan, shift-add multiply.
    FastDoublingShiftAdd = 3,
}

impl Algorithm {
    /// Every algorithm in opcode order.
    pub const ALL: [Self; 4] = [
        Self::AdditionDp,
        Self::FastDoublingNative,
        Self::FastDoublingClz,
        Self::FastDoublingShiftAdd,
    ];

    /// Map a write length to an algorithm. Unknown lengths select nothing.
    #[must_use]
    pub const fn from_opcode(len: usize) -> Option<Self> {
        match len {
            0 => Some(Self::AdditionDp),
            1 => Some(Self::FastDoublingNative),
            2 => Some(Self::FastDoublingClz),
            3 => Some(Self::FastDoublingShiftAdd),
            _ => None,
        }
    }

    /// The write length that selects this algorithm.
    #[must_use]
    pub const fn opcode(self) -> usize {
        self as usize
    }

    /// Inverse of `self as u8`; used when the selector lives in an atomic.
    #[must_use]
    pub const fn from_repr(v: u8) -> Option<Self> {
        Self::from_opcode(v as usize)
    }

    /// Short name accepted by [`FromStr`].
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::AdditionDp => "add",
            Self::FastDoublingNative => "fast",
            Self::FastDoublingClz => "clz",
            Self::FastDoublingShiftAdd => "smul",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::registry::engine_for(*self).name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::registry::lookup(s)
    }
}
