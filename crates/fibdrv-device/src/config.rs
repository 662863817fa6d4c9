//! Device configuration.

use fibdrv_core::{BigInt128, MAX_INDEX};

use crate::error::DeviceError;

/// Width of the value a read copies out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultWidth {
    /// One little-endian `u64`.
    #[default]
    Narrow,
    /// Two little-endian words, `lower` then `upper`.
    Wide,
}

impl ResultWidth {
    /// Size in bytes of one logical read unit.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Narrow => 8,
            Self::Wide => BigInt128::BYTES,
        }
    }
}

/// Options fixed when a device is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Highest addressable index; seeks clamp to `[0, max_index]`.
    pub max_index: u64,
    /// Read layout.
    pub width: ResultWidth,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            max_index: MAX_INDEX,
            width: ResultWidth::Narrow,
        }
    }
}

impl DeviceConfig {
    /// Reject bounds the engines cannot serve.
    pub fn validate(self) -> Result<Self, DeviceError> {
        if self.max_index > MAX_INDEX {
            return Err(DeviceError::Config(format!(
                "max_index {} exceeds {MAX_INDEX}",
                self.max_index
            )));
        }
        Ok(self)
    }
}
