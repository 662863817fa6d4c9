//! Wire-level pieces of the access protocol: seek modes, the write
//! acknowledgement, the read result layout, and the read status record.

use std::time::Duration;

use fibdrv_core::BigInt128;

use crate::config::ResultWidth;

/// Status returned by every write, recognized opcode or not.
pub const WRITE_ACK: usize = 1;

/// How a seek target is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekMode {
    /// The target is the new offset.
    Absolute,
    /// The target is added to the current offset.
    Relative,
    /// The target is subtracted from the highest index.
    FromEnd,
}

impl SeekMode {
    /// Map the classic whence codes (0 = set, 1 = current, 2 = end).
    #[must_use]
    pub const fn from_whence(whence: i32) -> Option<Self> {
        match whence {
            0 => Some(Self::Absolute),
            1 => Some(Self::Relative),
            2 => Some(Self::FromEnd),
            _ => None,
        }
    }
}

/// Result of a read: bytes copied into the caller's buffer and the time the
/// engine spent computing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    pub bytes_written: usize,
    pub elapsed_nanos: u64,
}

/// A decoded read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Index the value was computed at.
    pub index: u64,
    /// F(index), zero-extended in the narrow layout.
    pub value: BigInt128,
    /// Time spent in the engine.
    pub elapsed: Duration,
}

impl Reading {
    /// Elapsed time in nanoseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.elapsed.as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Copy one logical unit of `value` into `buf`. A short buffer receives the
/// leading bytes only; bytes past the unit are left untouched.
pub fn encode(value: BigInt128, width: ResultWidth, buf: &mut [u8]) -> usize {
    let bytes = value.to_le_bytes();
    let n = width.bytes().min(buf.len());
    buf[..n].copy_from_slice(&bytes[..n]);
    n
}

/// Decode one logical unit from `buf`, treating missing bytes as zero.
#[must_use]
pub fn decode(buf: &[u8], width: ResultWidth) -> BigInt128 {
    let mut bytes = [0u8; BigInt128::BYTES];
    let n = width.bytes().min(buf.len());
    bytes[..n].copy_from_slice(&buf[..n]);
    BigInt128::from_le_bytes(bytes)
}
