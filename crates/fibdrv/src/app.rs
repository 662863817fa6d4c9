//! Application entry point and dispatch.

use anyhow::{Context, Result};

use fibdrv_cli::presenter::{CLIPresenter, SweepPresenter};
use fibdrv_cli::timelog::write_time_log;
use fibdrv_cli::{analyze_sweeps, execute_sweep, SweepResult};
use fibdrv_device::Device;

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        fibdrv_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let algorithms = config.algorithms()?;
    let device = Device::with_config(config.device_config())?;
    let presenter = CLIPresenter::new(config.verbose, config.quiet);
    let opts = config.sweep_options();

    let mut session = device.open()?;
    let results: Vec<SweepResult> = algorithms
        .iter()
        .map(|&algo| execute_sweep(&mut session, algo, &opts, &presenter))
        .collect();
    session.close();

    // Cross-check engines
    if results.len() > 1 {
        analyze_sweeps(&results)?;
    }

    presenter.present_summary(&results);

    write_time_log(&config.time_log, &results, config.log_format()).with_context(|| {
        format!("failed to write time log {}", config.time_log.display())
    })?;

    Ok(())
}
