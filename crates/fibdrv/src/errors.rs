//! Error handling and exit codes.

use fibdrv_cli::SweepError;
use fibdrv_core::constants::exit_codes;
use fibdrv_core::EngineError;
use fibdrv_device::DeviceError;

/// Map an application error to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(sweep) = err.downcast_ref::<SweepError>() {
        return match sweep {
            SweepError::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
            SweepError::NoResults => exit_codes::ERROR_GENERIC,
        };
    }
    if err.downcast_ref::<EngineError>().is_some() {
        return exit_codes::ERROR_CONFIG;
    }
    match err.downcast_ref::<DeviceError>() {
        Some(DeviceError::Config(_)) => exit_codes::ERROR_CONFIG,
        Some(DeviceError::Busy) | None => exit_codes::ERROR_GENERIC,
    }
}
