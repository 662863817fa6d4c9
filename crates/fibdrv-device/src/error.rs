//! Device error type.

/// Errors surfaced by the device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Another session holds the device.
    #[error("device is busy")]
    Busy,

    /// The device configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}
