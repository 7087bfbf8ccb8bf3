//! Prober trait abstraction.
//!
//! The dispatcher drives any `Prober`, which keeps the concurrency and
//! ordering logic testable without touching the network.

use crate::scanner::ScanResult;
use crate::types::Port;
use async_trait::async_trait;
use std::time::Duration;

/// Trait for single-port probe implementations.
///
/// A probe never fails: every way a port can be unreachable is an expected
/// outcome and is reported as a closed [`ScanResult`].
///
/// # Example
///
/// ```ignore
/// use port_scanner::scanner::{Prober, TcpProber};
///
/// let result = TcpProber::new().probe("127.0.0.1", Port::new(22), timeout).await;
/// println!("{}:{} open = {}", result.host(), result.port(), result.is_open());
/// ```
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    /// Probe one `(host, port)` pair, bounded by `timeout` per network wait.
    async fn probe(&self, host: &str, port: Port, timeout: Duration) -> ScanResult;
}
