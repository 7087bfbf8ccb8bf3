//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing. Input is
//! validated completely before the first probe goes out.

use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output::{self, ConsoleReporter};
use crate::scanner::{Dispatcher, ResultAggregator, ScanConfig, ScanOutcome, TcpProber};
use crate::types::{parse_hosts, parse_ports, HostValidator, TargetSet};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Exit status after a user interrupt (128 + SIGINT).
pub const EXIT_INTERRUPTED: u8 = 130;

/// A fast, multi-threaded TCP port scanner.
#[derive(Parser, Debug)]
#[command(name = "port-scanner")]
#[command(version)]
#[command(about = "A fast, multi-threaded port scanner", long_about = None)]
pub struct Cli {
    /// Target IP(s) or hostname(s), comma-separated
    #[arg(short = 't', long, value_name = "HOSTS")]
    pub target: String,

    /// Port range (e.g., 20-80) or specific ports (e.g., 22,80,443)
    #[arg(short = 'p', long)]
    pub ports: String,

    /// Output base name for results (without extension)
    #[arg(short = 'o', long, value_name = "BASE")]
    pub output: Option<String>,

    /// Connection timeout in seconds (default: 1.0)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Number of concurrent probes per host (default: 100)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Enable debug logging and a progress bar
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH", env = "PORT_SCANNER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load settings from `--config` or the default location.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(settings)
    }

    /// Resolve the scan configuration: flags first, then settings.
    pub fn scan_config(&self, settings: &AppSettings) -> CliResult<ScanConfig> {
        let config = ScanConfig::from_user(
            self.timeout.unwrap_or(settings.default_timeout_secs),
            self.threads.unwrap_or(settings.default_threads),
        )?;
        Ok(config)
    }

    /// Validate input, run the scan and export the results.
    ///
    /// `interrupt` is called once input is valid, right before the first
    /// probe, and returns the token that stops the scan. Interruption is not
    /// an error: results gathered so far are exported and
    /// [`ScanOutcome::Interrupted`] is returned.
    pub async fn execute<F>(&self, interrupt: F) -> CliResult<ScanOutcome>
    where
        F: FnOnce() -> CancellationToken,
    {
        let settings = self.settings()?;

        let hosts = parse_hosts(&self.target)?;
        HostValidator::new().validate(&hosts).await?;
        let ports = parse_ports(&self.ports)?;
        let config = self.scan_config(&settings)?;
        debug!(?config, hosts = hosts.len(), ports = ports.len(), "input validated");

        let targets = TargetSet::new(hosts, ports);
        if !self.quiet {
            output::print_scan_header(targets.hosts().len(), targets.ports().len());
        }

        let mut aggregator = ResultAggregator::new(ConsoleReporter::new(self.verbose, self.quiet));
        let dispatcher = Dispatcher::new(TcpProber::new(), config);
        let cancel = interrupt();
        let outcome = dispatcher.scan(&targets, &mut aggregator, &cancel).await;

        info!(
            ?outcome,
            probes = aggregator.probes_recorded(),
            open = aggregator.open_count(),
            failed = aggregator.failed_probes(),
            "scan finished"
        );
        if outcome == ScanOutcome::Interrupted {
            output::print_warning("Scan interrupted by user");
        }

        let results = aggregator.into_results();
        if let Some(base) = &self.output {
            let written = output::export_all(base, &results)?;
            if !self.quiet {
                let names: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
                output::print_success(&format!("Scan results saved to {}", names.join(" and ")));
            }
        }

        if outcome == ScanOutcome::Completed && !self.quiet {
            println!();
            output::print_success("Scan completed!");
        }

        Ok(outcome)
    }
}

/// A cancellation token that fires on the first Ctrl-C.
///
/// A second Ctrl-C exits the process immediately with status 130.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        trigger.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            output::print_warning("Interrupted again, exiting");
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
    });
    cancel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ConfigError};
    use crate::types::{PortError, TargetError};
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("port-scanner").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_required_arguments() {
        assert!(Cli::try_parse_from(["port-scanner", "-t", "127.0.0.1"]).is_err());
        assert!(Cli::try_parse_from(["port-scanner", "-p", "80"]).is_err());
    }

    #[test]
    fn test_short_and_long_flags() {
        let cli = parse(&["-t", "a,b", "-p", "22,80", "-o", "out", "--timeout", "0.5", "--threads", "8"]);
        assert_eq!(cli.target, "a,b");
        assert_eq!(cli.ports, "22,80");
        assert_eq!(cli.output.as_deref(), Some("out"));
        assert_eq!(cli.timeout, Some(0.5));
        assert_eq!(cli.threads, Some(8));
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = AppSettings {
            default_timeout_secs: 3.0,
            default_threads: 10,
            ..AppSettings::default()
        };

        let cli = parse(&["-t", "h", "-p", "1", "--threads", "4"]);
        let config = cli.scan_config(&settings).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_invalid_thread_count() {
        let cli = parse(&["-t", "h", "-p", "1", "--threads", "0"]);
        assert!(matches!(
            cli.scan_config(&AppSettings::default()),
            Err(CliError::Config(ConfigError::InvalidConcurrency(0)))
        ));
    }

    fn cancelled() -> CancellationToken {
        let cancel = CancellationToken::new();
        cancel.cancel();
        cancel
    }

    fn with_empty_settings(args: &[&str]) -> (Cli, tempfile::NamedTempFile) {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{}").unwrap();
        let mut cli = parse(args);
        cli.config = Some(file.path().to_path_buf());
        (cli, file)
    }

    #[tokio::test]
    async fn test_invalid_target_rejected_before_scan() {
        let (cli, _file) = with_empty_settings(&["-q", "-t", "127.0.0.1,not a host", "-p", "80"]);
        let err = cli.execute(CancellationToken::new).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Target(TargetError::Invalid(ref hosts)) if hosts == &["not a host".to_string()]
        ));
    }

    #[tokio::test]
    async fn test_invalid_ports_rejected_before_scan() {
        let (cli, _file) = with_empty_settings(&["-q", "-t", "127.0.0.1", "-p", "100-99"]);
        let err = cli.execute(CancellationToken::new).await.unwrap_err();
        assert!(matches!(err, CliError::Port(PortError::InvalidRange(100, 99))));
    }

    #[tokio::test]
    async fn test_interrupted_run_still_exports() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("partial");
        let base = base.to_str().unwrap().to_string();
        let (cli, _file) =
            with_empty_settings(&["-q", "-t", "127.0.0.1", "-p", "1-10", "-o", base.as_str()]);

        let outcome = cli.execute(cancelled).await.unwrap();

        assert_eq!(outcome, ScanOutcome::Interrupted);
        let json = std::fs::read_to_string(format!("{}.json", base)).unwrap();
        assert_eq!(json, "[]");
        assert!(!std::path::Path::new(&format!("{}.csv", base)).exists());
    }

    #[tokio::test]
    async fn test_interrupt_not_armed_for_invalid_input() {
        let (cli, _file) = with_empty_settings(&["-q", "-t", "127.0.0.1,not a host", "-p", "80"]);
        let mut armed = false;
        let result = cli
            .execute(|| {
                armed = true;
                CancellationToken::new()
            })
            .await;

        assert!(result.is_err());
        assert!(!armed);
    }

    #[tokio::test]
    async fn test_output_always_writes_json_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("scan");
        let base = base.to_str().unwrap().to_string();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                drop(socket);
            }
        });

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{ "export_json": false, "export_csv": false }"#).unwrap();
        let mut cli = parse(&["-q", "-t", "127.0.0.1", "-p", port.as_str(), "-o", base.as_str()]);
        cli.config = Some(file.path().to_path_buf());

        let outcome = cli.execute(CancellationToken::new).await.unwrap();

        assert_eq!(outcome, ScanOutcome::Completed);
        assert!(std::path::Path::new(&format!("{}.json", base)).exists());
        assert!(std::path::Path::new(&format!("{}.csv", base)).exists());
    }
}
