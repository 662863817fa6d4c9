//! The device: access lock plus the state shared by every session.
//!
//! The algorithm selector and the last read duration live here, not in
//! the session. A selection made through one session is seen by every
//! later read, including reads from sessions opened after it closed.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, warn};

use fibdrv_core::{engine_for, Algorithm, BigInt128};

use crate::config::{DeviceConfig, ResultWidth};
use crate::error::DeviceError;
use crate::protocol::Reading;
use crate::session::Session;

static GLOBAL: OnceLock<Device> = OnceLock::new();

/// Exclusive-access Fibonacci device.
///
/// # Example
/// ```
/// use fibdrv_device::{Device, DeviceError, SeekMode};
///
/// let device = Device::new();
/// let mut session = device.open().unwrap();
/// assert_eq!(device.open().err(), Some(DeviceError::Busy));
///
/// session.seek(10, SeekMode::Absolute);
/// assert_eq!(session.read_value().value.lower, 55);
/// ```
pub struct Device {
    lock: Mutex<()>,
    algorithm: AtomicU8,
    last_elapsed_nanos: AtomicU64,
    max_offset: i64,
    width: ResultWidth,
}

impl Device {
    /// Create a device with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid(DeviceConfig::default())
    }

    /// Create a device from a configuration, validating it first.
    pub fn with_config(config: DeviceConfig) -> Result<Self, DeviceError> {
        config.validate().map(Self::from_valid)
    }

    fn from_valid(config: DeviceConfig) -> Self {
        Self {
            lock: Mutex::new(()),
            algorithm: AtomicU8::new(Algorithm::default() as u8),
            last_elapsed_nanos: AtomicU64::new(0),
            // validated against MAX_INDEX, so it fits
            max_offset: i64::try_from(config.max_index).unwrap_or(i64::MAX),
            width: config.width,
        }
    }

    /// The process-wide device, created with the default configuration on
    /// first use.
    pub fn global() -> &'static Device {
        GLOBAL.get_or_init(Device::new)
    }

    /// Open a session. Fails immediately with `Busy` if one is open.
    pub fn open(&self) -> Result<Session<'_>, DeviceError> {
        match self.lock.try_lock() {
            Some(guard) => {
                debug!(algorithm = %self.algorithm(), "session opened");
                Ok(Session::new(self, guard))
            }
            None => {
                warn!("fibdrv is in use");
                Err(DeviceError::Busy)
            }
        }
    }

    /// Whether a session currently holds the device.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock.is_locked()
    }

    /// The active algorithm.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::from_repr(self.algorithm.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Replace the active algorithm for every session.
    pub fn set_algorithm(&self, algo: Algorithm) {
        self.algorithm.store(algo as u8, Ordering::Release);
        debug!(algorithm = %algo, "algorithm selected");
    }

    /// Engine time of the most recent read, in nanoseconds.
    #[must_use]
    pub fn last_elapsed_nanos(&self) -> u64 {
        self.last_elapsed_nanos.load(Ordering::Relaxed)
    }

    /// Highest addressable offset.
    #[must_use]
    pub fn max_offset(&self) -> i64 {
        self.max_offset
    }

    /// Read layout.
    #[must_use]
    pub fn width(&self) -> ResultWidth {
        self.width
    }

    pub(crate) fn clamp(&self, pos: i64) -> i64 {
        pos.clamp(0, self.max_offset)
    }

    /// Run the active engine at `index`, timing only the engine call.
    pub(crate) fn compute_timed(&self, index: i64) -> Reading {
        let index = u64::try_from(self.clamp(index)).unwrap_or_default();
        let engine = engine_for(self.algorithm());

        let (value, elapsed) = match self.width {
            ResultWidth::Narrow => {
                let start = Instant::now();
                let v = engine.compute(index);
                (BigInt128::from(v), start.elapsed())
            }
            ResultWidth::Wide => {
                let start = Instant::now();
                let v = engine.compute_wide(index);
                (v, start.elapsed())
            }
        };

        let reading = Reading {
            index,
            value,
            elapsed,
        };
        self.last_elapsed_nanos
            .store(reading.elapsed_nanos(), Ordering::Relaxed);
        debug!(
            engine = engine.name(),
            index,
            elapsed_ns = reading.elapsed_nanos(),
            "computed"
        );
        reading
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}
