//! Console presenter for sweeps.

use console::style;

use fibdrv_core::{Algorithm, BigInt128};

use crate::output::{format_nanos, format_value};
use crate::sweep::SweepResult;

/// Receives sweep events for display.
pub trait SweepPresenter: Send + Sync {
    /// A write selected (or failed to select) an engine.
    fn present_write(&self, algo: Algorithm, status: usize);

    /// A read returned `value` at the requested offset.
    fn present_reading(&self, offset: i64, value: BigInt128, device_ns: u64);

    /// All sweeps finished.
    fn present_summary(&self, results: &[SweepResult]);

    /// Something failed.
    fn present_error(&self, error: &str);
}

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// Line-oriented presenter mirroring the reference client's output.
pub struct CLIPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl SweepPresenter for CLIPresenter {
    fn present_write(&self, algo: Algorithm, status: usize) {
        if self.quiet {
            return;
        }
        println!("Writing to fibdrv ({algo}), returned the sequence {status}");
    }

    fn present_reading(&self, offset: i64, value: BigInt128, device_ns: u64) {
        if self.quiet {
            return;
        }
        if self.verbose {
            println!(
                "Reading from fibdrv at offset {offset}, returned the sequence {}. ({})",
                format_value(value),
                format_nanos(device_ns)
            );
        } else {
            println!(
                "Reading from fibdrv at offset {offset}, returned the sequence {}.",
                format_value(value)
            );
        }
    }

    fn present_summary(&self, results: &[SweepResult]) {
        if self.quiet || results.is_empty() {
            return;
        }

        let title = "Sweep Summary";
        if is_color_disabled() {
            println!("\n=== {title} ===");
        } else {
            println!("\n{}", style(format!("=== {title} ===")).bold().cyan());
        }
        println!(
            "  {:<22} {:>6} {:>12} {:>12}",
            "engine", "reads", "mean device", "mean client"
        );
        println!("{:-<58}", "");
        for result in results {
            println!(
                "  {:<22} {:>6} {:>12} {:>12}",
                result.algorithm.to_string(),
                result.records.len(),
                format_nanos(result.mean_device_ns()),
                format_nanos(result.mean_client_ns()),
            );
        }
    }

    fn present_error(&self, error: &str) {
        if is_color_disabled() {
            eprintln!("[ERROR] {error}");
        } else {
            eprintln!("{} {error}", style("[ERROR]").red().bold());
        }
    }
}
