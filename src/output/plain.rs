//! Plain text console output.
//!
//! Produces human-readable progress lines with colors and formatting.

use crate::scanner::{ProgressReporter, ScanResult};
use crate::services::UNKNOWN_SERVICE;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints open ports to stdout as they are found.
///
/// With `verbose` set, a progress bar tracks the probes of the current host;
/// port lines are printed above it.
#[derive(Default)]
pub struct ConsoleReporter {
    quiet: bool,
    verbose: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            quiet,
            verbose: verbose && !quiet,
            bar: None,
        }
    }

    fn emit(&self, line: String) {
        if self.quiet {
            return;
        }
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn host_started(&mut self, host: &str, port_count: usize) {
        self.emit(format!("\n{} {}...", style("Scanning").cyan(), style(host).bold()));

        if self.verbose {
            let bar = ProgressBar::new(port_count as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            bar.set_message(host.to_string());
            self.bar = Some(bar);
        }
    }

    fn probe_finished(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn port_open(&mut self, result: &ScanResult) {
        let service = match result.service() {
            "" => UNKNOWN_SERVICE,
            s => s,
        };

        self.emit(format!(
            "{} {}:{} ({}) is open",
            style("[+]").green().bold(),
            result.host(),
            result.port(),
            style(service).yellow()
        ));
        if !result.banner().is_empty() {
            self.emit(format!("    Banner: {}", style(result.banner()).dim()));
        }
    }

    fn host_finished(&mut self, _host: &str) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// Print the summary shown before scanning begins.
pub fn print_scan_header(targets: usize, ports: usize) {
    println!(
        "{} v{}",
        style("port-scanner").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Starting scan on {} target(s) with {} port(s)",
        style("•").dim(),
        style(targets).white().bold(),
        style(ports).white().bold()
    );
    println!("{} Press Ctrl+C to stop the scan", style("•").dim());
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}
