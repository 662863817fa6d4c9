//! Console formatting helpers.

use std::time::Duration;

use fibdrv_core::BigInt128;

/// Format a read value the way the reference client prints it: hex, with
/// the upper word omitted when it is zero.
#[must_use]
pub fn format_value(value: BigInt128) -> String {
    format!("{value:x}")
}

/// Format a duration for display.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{nanos}ns")
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}

/// Format nanoseconds for display.
#[must_use]
pub fn format_nanos(nanos: u64) -> String {
    format_duration(Duration::from_nanos(nanos))
}
