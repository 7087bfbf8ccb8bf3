//! port-scanner - concurrent TCP port scanner.

use anyhow::Context;
use clap::Parser;
use port_scanner::cli::{cancel_on_ctrl_c, Cli, EXIT_INTERRUPTED};
use port_scanner::output;
use port_scanner::scanner::ScanOutcome;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let code = match cli.execute(cancel_on_ctrl_c).await {
        Ok(ScanOutcome::Completed) => ExitCode::SUCCESS,
        Ok(ScanOutcome::Interrupted) => ExitCode::from(EXIT_INTERRUPTED),
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    };

    Ok(code)
}

/// Logs go to stderr so stdout carries only scan output.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")
}
