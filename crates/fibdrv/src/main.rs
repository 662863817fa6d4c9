//! fibdrv: sweep the Fibonacci device and log read timings.

use fibdrv_cli::presenter::{CLIPresenter, SweepPresenter};
use fibdrv_lib::{app, config, errors};

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI args and run
    let config = config::AppConfig::parse();
    if let Err(err) = app::run(&config) {
        CLIPresenter::new(config.verbose, config.quiet).present_error(&format!("{err:#}"));
        std::process::exit(errors::exit_code(&err));
    }
}
