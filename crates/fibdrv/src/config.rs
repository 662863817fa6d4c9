//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::Parser;

use fibdrv_cli::timelog::LogFormat;
use fibdrv_cli::{SweepOptions, MAX_SWEEP_OFFSET};
use fibdrv_core::{registry, Algorithm, EngineError, MAX_INDEX};
use fibdrv_device::{DeviceConfig, ResultWidth};

/// fibdrv: Fibonacci device benchmark client.
///
/// Selects an engine by write length, reads F(0) through F(N) by seeking,
/// and logs the device's engine time next to the client's own timing.
#[derive(Parser, Debug)]
#[command(name = "fibdrv", version, about)]
pub struct AppConfig {
    /// Last offset to read; offsets past the device bound are clamped.
    #[arg(
        short = 'n',
        long,
        default_value = "100",
        env = "FIBDRV_MAX_OFFSET",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..=MAX_SWEEP_OFFSET)
    )]
    pub max_offset: i64,

    #[arg(long, default_value = "add", help = algo_help())]
    pub algo: String,

    /// Highest index the device addresses.
    #[arg(long, default_value_t = MAX_INDEX)]
    pub max_index: u64,

    /// Read results in the 16-byte two-word layout.
    #[arg(long)]
    pub wide: bool,

    /// Time log path.
    #[arg(long, default_value = "time.log")]
    pub time_log: PathBuf,

    /// Write the time log as JSON.
    #[arg(long)]
    pub json: bool,

    /// Skip the descending read pass.
    #[arg(long)]
    pub no_reverse: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

fn algo_help() -> String {
    format!("Engine to sweep: {}, or all.", registry::available().join(", "))
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Engines to sweep, in opcode order for `all`.
    pub fn algorithms(&self) -> Result<Vec<Algorithm>, EngineError> {
        if self.algo.trim().eq_ignore_ascii_case("all") {
            Ok(Algorithm::ALL.to_vec())
        } else {
            Ok(vec![self.algo.parse()?])
        }
    }

    #[must_use]
    pub fn device_config(&self) -> DeviceConfig {
        DeviceConfig {
            max_index: self.max_index,
            width: if self.wide {
                ResultWidth::Wide
            } else {
                ResultWidth::Narrow
            },
        }
    }

    #[must_use]
    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            max_offset: self.max_offset,
            reverse: !self.no_reverse,
        }
    }

    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        if self.json {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}
