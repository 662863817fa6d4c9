//! Fixed-width 128-bit unsigned integer built from two 64-bit words.
//!
//! Only addition is provided. The carry out of the low word is derived
//! from the operands before the wrapping add, since the wrapped sum alone
//! carries no overflow signal.

use std::fmt;
use std::ops::Add;

/// 128-bit unsigned value `upper * 2^64 + lower`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BigInt128 {
    /// High 64 bits.
    pub upper: u64,
    /// Low 64 bits.
    pub lower: u64,
}

impl BigInt128 {
    /// Zero.
    pub const ZERO: Self = Self { upper: 0, lower: 0 };

    /// Number of bytes in the little-endian layout.
    pub const BYTES: usize = 16;

    #[must_use]
    pub const fn new(upper: u64, lower: u64) -> Self {
        Self { upper, lower }
    }

    /// Carry-aware addition. The upper word wraps silently.
    ///
    /// # Example
    /// ```
    /// use fibdrv_core::BigInt128;
    /// let x = BigInt128::new(0, u64::MAX);
    /// let y = BigInt128::new(0, 1);
    /// assert_eq!(BigInt128::add(x, y), BigInt128::new(1, 0));
    /// ```
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub const fn add(x: Self, y: Self) -> Self {
        let carry = y.lower > !x.lower;
        let mut upper = x.upper.wrapping_add(y.upper);
        if carry {
            upper = upper.wrapping_add(1);
        }
        Self {
            upper,
            lower: x.lower.wrapping_add(y.lower),
        }
    }

    /// Two-word little-endian layout: `lower` first, then `upper`.
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        out[..8].copy_from_slice(&self.lower.to_le_bytes());
        out[8..].copy_from_slice(&self.upper.to_le_bytes());
        out
    }

    /// Inverse of [`BigInt128::to_le_bytes`].
    #[must_use]
    pub fn from_le_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let mut lower = [0u8; 8];
        let mut upper = [0u8; 8];
        lower.copy_from_slice(&bytes[..8]);
        upper.copy_from_slice(&bytes[8..]);
        Self {
            upper: u64::from_le_bytes(upper),
            lower: u64::from_le_bytes(lower),
        }
    }

    /// Whether the value fits in the low word alone.
    #[must_use]
    pub const fn is_narrow(self) -> bool {
        self.upper == 0
    }
}

impl Add for BigInt128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::add(self, rhs)
    }
}

impl From<u64> for BigInt128 {
    fn from(lower: u64) -> Self {
        Self { upper: 0, lower }
    }
}

impl From<u128> for BigInt128 {
    #[allow(clippy::cast_possible_truncation)]
    fn from(v: u128) -> Self {
        Self {
            upper: (v >> 64) as u64,
            lower: v as u64,
        }
    }
}

impl From<BigInt128> for u128 {
    fn from(v: BigInt128) -> Self {
        (u128::from(v.upper) << 64) | u128::from(v.lower)
    }
}

impl fmt::LowerHex for BigInt128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_narrow() {
            write!(f, "{:x}", self.lower)
        } else {
            write!(f, "{:x}{:016x}", self.upper, self.lower)
        }
    }
}

impl fmt::Display for BigInt128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u128::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_propagates() {
        let x = BigInt128::new(0, 0xFFFF_FFFF_FFFF_FFFF);
        let y = BigInt128::new(0, 1);
        assert_eq!(BigInt128::add(x, y), BigInt128::new(1, 0));
    }

    #[test]
    fn no_carry() {
        let x = BigInt128::new(5, 3);
        let y = BigInt128::new(2, 4);
        assert_eq!(BigInt128::add(x, y), BigInt128::new(7, 7));
    }

    #[test]
    fn carry_with_nonzero_upper() {
        let x = BigInt128::new(3, u64::MAX - 1);
        let y = BigInt128::new(4, 5);
        assert_eq!(x + y, BigInt128::new(8, 3));
    }

    #[test]
    fn exact_boundary_has_no_carry() {
        // y.lower == !x.lower sums to u64::MAX without overflowing
        let x = BigInt128::new(0, 0xF0F0);
        let y = BigInt128::new(0, !0xF0F0);
        assert_eq!(x + y, BigInt128::new(0, u64::MAX));
    }

    #[test]
    fn upper_wraps_silently() {
        let x = BigInt128::new(u64::MAX, u64::MAX);
        let y = BigInt128::new(0, 1);
        assert_eq!(x + y, BigInt128::ZERO);
    }

    #[test]
    fn matches_u128_addition() {
        let pairs = [
            (0u128, 0u128),
            (u128::from(u64::MAX), 1),
            (u128::from(u64::MAX) * 3, u128::from(u64::MAX) * 7 + 11),
            (1 << 100, (1 << 100) - 1),
        ];
        for (a, b) in pairs {
            let sum = BigInt128::from(a) + BigInt128::from(b);
            assert_eq!(u128::from(sum), a + b);
        }
    }

    #[test]
    fn le_layout_is_lower_then_upper() {
        let v = BigInt128::new(0x0102, 0x0A0B);
        let bytes = v.to_le_bytes();
        assert_eq!(&bytes[..2], &[0x0B, 0x0A]);
        assert_eq!(&bytes[8..10], &[0x02, 0x01]);
        assert_eq!(BigInt128::from_le_bytes(bytes), v);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(format!("{:x}", BigInt128::from(255u64)), "ff");
        assert_eq!(format!("{:x}", BigInt128::new(1, 2)), "10000000000000002");
    }

    #[test]
    fn narrow_values_have_no_upper_word() {
        assert!(BigInt128::from(u64::MAX).is_narrow());
        assert!(BigInt128::ZERO.is_narrow());
        let carried = BigInt128::new(0, u64::MAX) + BigInt128::from(1u64);
        assert!(!carried.is_narrow());
        assert_eq!(format!("{carried:x}"), "10000000000000000");
    }

    #[test]
    fn decimal_formatting() {
        assert_eq!(BigInt128::new(1, 0).to_string(), "18446744073709551616");
    }
}
