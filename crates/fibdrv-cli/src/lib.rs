//! # fibdrv-cli
//!
//! The benchmark client's building blocks: the seek/read sweep, engine
//! cross-checking, the time log, console output, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod sweep;
pub mod timelog;

pub use presenter::{CLIPresenter, SweepPresenter};
pub use sweep::{analyze_sweeps, execute_sweep, SweepError, SweepOptions, SweepResult, MAX_SWEEP_OFFSET};
