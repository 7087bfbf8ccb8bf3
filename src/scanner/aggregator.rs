//! Result aggregation.
//!
//! The aggregator is the single writer of the retained result list. The
//! dispatcher hands it every completed probe; closed ports are counted and
//! dropped, open ports are kept in completion order and announced through a
//! [`ProgressReporter`].

use crate::scanner::ScanResult;

/// Receives progress notifications while a scan runs.
///
/// Only [`ProgressReporter::port_open`] is required; the host and probe hooks
/// default to doing nothing.
pub trait ProgressReporter: Send {
    /// A host's ports are about to be probed.
    fn host_started(&mut self, _host: &str, _port_count: usize) {}

    /// One probe finished, open or not.
    fn probe_finished(&mut self) {}

    /// An open port was retained.
    fn port_open(&mut self, result: &ScanResult);

    /// Every probe for a host has completed.
    fn host_finished(&mut self, _host: &str) {}
}

/// A reporter that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn port_open(&mut self, _result: &ScanResult) {}
}

/// Collects probe outcomes and retains the open ones.
pub struct ResultAggregator {
    results: Vec<ScanResult>,
    reporter: Box<dyn ProgressReporter>,
    probes_recorded: usize,
    failed_probes: usize,
}

impl ResultAggregator {
    /// Create an aggregator that reports through `reporter`.
    pub fn new(reporter: impl ProgressReporter + 'static) -> Self {
        Self {
            results: Vec::new(),
            reporter: Box::new(reporter),
            probes_recorded: 0,
            failed_probes: 0,
        }
    }

    /// Create an aggregator with no progress output.
    pub fn silent() -> Self {
        Self::new(SilentReporter)
    }

    /// Record one probe outcome.
    pub fn record(&mut self, result: ScanResult) {
        self.probes_recorded += 1;
        self.reporter.probe_finished();

        if !result.is_open() {
            return;
        }

        self.reporter.port_open(&result);
        self.results.push(result);
    }

    /// Record a probe that produced no outcome at all (its task died).
    pub fn record_failure(&mut self) {
        self.failed_probes += 1;
        self.reporter.probe_finished();
    }

    pub(crate) fn begin_host(&mut self, host: &str, port_count: usize) {
        self.reporter.host_started(host, port_count);
    }

    pub(crate) fn end_host(&mut self, host: &str) {
        self.reporter.host_finished(host);
    }

    /// Retained open-port results, in completion order.
    pub fn results(&self) -> &[ScanResult] {
        &self.results
    }

    /// Consume the aggregator, returning the retained results.
    pub fn into_results(self) -> Vec<ScanResult> {
        self.results
    }

    /// Number of outcomes handed to [`ResultAggregator::record`].
    pub fn probes_recorded(&self) -> usize {
        self.probes_recorded
    }

    /// Number of probes whose task failed before producing an outcome.
    pub fn failed_probes(&self) -> usize {
        self.failed_probes
    }

    pub fn open_count(&self) -> usize {
        self.results.len()
    }
}

impl std::fmt::Debug for ResultAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultAggregator")
            .field("results", &self.results)
            .field("probes_recorded", &self.probes_recorded)
            .field("failed_probes", &self.failed_probes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        opened: Arc<Mutex<Vec<u16>>>,
        finished: Arc<Mutex<usize>>,
    }

    impl ProgressReporter for Recorder {
        fn probe_finished(&mut self) {
            *self.finished.lock().unwrap() += 1;
        }

        fn port_open(&mut self, result: &ScanResult) {
            self.opened.lock().unwrap().push(result.port().as_u16());
        }
    }

    fn open(port: u16) -> ScanResult {
        ScanResult::open("10.0.0.1", Port::new(port), String::new(), "t".into())
    }

    fn closed(port: u16) -> ScanResult {
        ScanResult::closed("10.0.0.1", Port::new(port), "t".into())
    }

    #[test]
    fn test_closed_results_discarded() {
        let mut agg = ResultAggregator::silent();
        agg.record(closed(1));
        agg.record(closed(2));
        assert!(agg.results().is_empty());
        assert_eq!(agg.probes_recorded(), 2);
    }

    #[test]
    fn test_open_results_kept_in_completion_order() {
        let recorder = Recorder::default();
        let mut agg = ResultAggregator::new(recorder.clone());

        agg.record(open(443));
        agg.record(closed(444));
        agg.record(open(22));

        let ports: Vec<u16> = agg.results().iter().map(|r| r.port().as_u16()).collect();
        assert_eq!(ports, vec![443, 22]);
        assert_eq!(*recorder.opened.lock().unwrap(), vec![443, 22]);
        assert_eq!(*recorder.finished.lock().unwrap(), 3);
        assert_eq!(agg.open_count(), 2);
    }

    #[test]
    fn test_record_failure_counted_separately() {
        let mut agg = ResultAggregator::silent();
        agg.record_failure();
        assert_eq!(agg.failed_probes(), 1);
        assert_eq!(agg.probes_recorded(), 0);
    }
}
