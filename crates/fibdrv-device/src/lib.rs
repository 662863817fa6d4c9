//! # fibdrv-device
//!
//! A process-local stand-in for the Fibonacci character device: a
//! [`Device`] hands out one exclusive [`Session`] at a time, and the session
//! exposes the file-like `read`/`write`/`seek` protocol on top of the
//! engines in `fibdrv-core`.

pub mod config;
pub mod device;
pub mod error;
pub mod protocol;
pub mod session;

pub use config::{DeviceConfig, ResultWidth};
pub use device::Device;
pub use error::DeviceError;
pub use protocol::{ReadOutcome, Reading, SeekMode, WRITE_ACK};
pub use session::Session;
