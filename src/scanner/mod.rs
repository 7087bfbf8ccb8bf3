//! Scanner module - probes, aggregation and the work dispatcher.
//!
//! Hosts are scanned one after another. Within a host every requested port
//! is probed by a bounded pool of tokio tasks, and each outcome is handed to
//! the [`ResultAggregator`] as soon as its task completes.

pub mod aggregator;
pub mod probe;
pub mod traits;

pub use aggregator::{ProgressReporter, ResultAggregator, SilentReporter};
pub use probe::TcpProber;
pub use traits::Prober;

use crate::error::{ConfigError, ConfigResult};
use crate::services::get_service_name;
use crate::types::{Port, TargetSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Format used for [`ScanResult::scan_time`].
pub const SCAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock time, formatted for scan results.
pub fn timestamp_now() -> String {
    chrono::Local::now().format(SCAN_TIME_FORMAT).to_string()
}

/// Outcome of probing a single port.
///
/// Built only through [`ScanResult::open`] and [`ScanResult::closed`], so a
/// closed result never carries a service or banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    host: String,
    port: Port,
    is_open: bool,
    service: String,
    banner: String,
    scan_time: String,
}

impl ScanResult {
    /// An open port, labelled from the service table.
    pub fn open(host: impl Into<String>, port: Port, banner: String, scan_time: String) -> Self {
        Self {
            host: host.into(),
            port,
            is_open: true,
            service: get_service_name(port.as_u16())
                .unwrap_or_default()
                .to_string(),
            banner,
            scan_time,
        }
    }

    /// A port that could not be connected to.
    pub fn closed(host: impl Into<String>, port: Port, scan_time: String) -> Self {
        Self {
            host: host.into(),
            port,
            is_open: false,
            service: String::new(),
            banner: String::new(),
            scan_time,
        }
    }

    /// The host exactly as supplied by the caller.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Well-known service name, empty when unclassified or closed.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// First line of the port's response, empty when nothing was read.
    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// When the probe was issued.
    pub fn scan_time(&self) -> &str {
        &self.scan_time
    }
}

/// Run-wide scan parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Bound on each network wait (connect, then banner exchange).
    pub timeout: Duration,
    /// Maximum probes in flight for the current host.
    pub concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            concurrency: 100,
        }
    }
}

impl ScanConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from user-facing values, validating both.
    pub fn from_user(timeout_secs: f64, threads: usize) -> ConfigResult<Self> {
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .map_err(|_| ConfigError::InvalidTimeout(timeout_secs))?;
        let config = Self {
            timeout,
            concurrency: threads,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the timeout is non-zero and at least one probe may run.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(self.timeout.as_secs_f64()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(self.concurrency));
        }
        Ok(())
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the concurrency, never below one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// How a scan run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every host and port was probed.
    Completed,
    /// Cancellation stopped the run early.
    Interrupted,
}

/// Distributes probes over a bounded pool of tasks, host by host.
pub struct Dispatcher<P: Prober> {
    prober: Arc<P>,
    config: ScanConfig,
}

impl<P: Prober> Dispatcher<P> {
    /// Create a dispatcher.
    pub fn new(prober: P, config: ScanConfig) -> Self {
        Self {
            prober: Arc::new(prober),
            config: config.with_concurrency(config.concurrency),
        }
    }

    /// Scan every host in order, feeding outcomes to `aggregator`.
    ///
    /// Returns [`ScanOutcome::Interrupted`] as soon as `cancel` fires; results
    /// recorded up to that point are left untouched.
    pub async fn scan(
        &self,
        targets: &TargetSet,
        aggregator: &mut ResultAggregator,
        cancel: &CancellationToken,
    ) -> ScanOutcome {
        for host in targets.hosts() {
            if cancel.is_cancelled() {
                return ScanOutcome::Interrupted;
            }
            if self.scan_host(host, targets.ports(), aggregator, cancel).await
                == ScanOutcome::Interrupted
            {
                return ScanOutcome::Interrupted;
            }
        }
        ScanOutcome::Completed
    }

    async fn scan_host(
        &self,
        host: &str,
        ports: &[Port],
        aggregator: &mut ResultAggregator,
        cancel: &CancellationToken,
    ) -> ScanOutcome {
        debug!(host, ports = ports.len(), concurrency = self.config.concurrency, "scanning host");
        aggregator.begin_host(host, ports.len());

        let shared_host: Arc<str> = Arc::from(host);
        let mut pending = ports.iter().copied();
        let mut in_flight = JoinSet::new();

        loop {
            while in_flight.len() < self.config.concurrency {
                let Some(port) = pending.next() else { break };
                let prober = Arc::clone(&self.prober);
                let host = Arc::clone(&shared_host);
                let timeout = self.config.timeout;
                in_flight.spawn(async move { prober.probe(&host, port, timeout).await });
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!(host, abandoned = in_flight.len(), "scan interrupted, abandoning in-flight probes");
                    in_flight.abort_all();
                    return ScanOutcome::Interrupted;
                }
                joined = in_flight.join_next() => match joined {
                    Some(Ok(result)) => aggregator.record(result),
                    Some(Err(e)) => {
                        error!(host, error = %e, "probe task failed");
                        aggregator.record_failure();
                    }
                    None => break,
                },
            }
        }

        aggregator.end_host(host);
        debug!(host, open = aggregator.open_count(), "host complete");
        ScanOutcome::Completed
    }
}
