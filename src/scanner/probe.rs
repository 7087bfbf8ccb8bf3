//! TCP connect probe.
//!
//! Performs a full TCP handshake against one port using the operating
//! system's socket API, then makes a single best-effort attempt to read a
//! banner. The socket is owned by the probe and dropped before it returns.

use crate::banner::grab_banner;
use crate::error::ProbeError;
use crate::scanner::traits::Prober;
use crate::scanner::{timestamp_now, ScanResult};
use crate::types::Port;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tracing::trace;

/// TCP connect prober.
///
/// Does not require elevated privileges. Worst-case wall time per probe is
/// twice the timeout: once for the connect, once for the banner exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber;

impl TcpProber {
    /// Create a new TCP connect prober.
    pub fn new() -> Self {
        Self
    }

    /// Resolve and connect to the target, bounded by `budget`.
    async fn attempt_connect(
        &self,
        host: &str,
        port: Port,
        budget: Duration,
    ) -> Result<TcpStream, ProbeError> {
        let connect = async {
            let addrs: Vec<SocketAddr> = lookup_host((host, port.as_u16()))
                .await
                .map_err(|_| ProbeError::Resolution(host.to_string()))?
                .collect();
            if addrs.is_empty() {
                return Err(ProbeError::Resolution(host.to_string()));
            }

            TcpStream::connect(&addrs[..]).await.map_err(ProbeError::from)
        };

        match timeout(budget, connect).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout),
        }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: &str, port: Port, budget: Duration) -> ScanResult {
        let scan_time = timestamp_now();

        let mut stream = match self.attempt_connect(host, port, budget).await {
            Ok(stream) => stream,
            Err(e) => {
                trace!(host, %port, reason = %e, "port not open");
                return ScanResult::closed(host, port, scan_time);
            }
        };

        let banner = match grab_banner(&mut stream, budget).await {
            Ok(banner) => banner,
            Err(e) => {
                trace!(host, %port, reason = %e, "banner unavailable");
                String::new()
            }
        };
        drop(stream);

        ScanResult::open(host, port, banner, scan_time)
    }
}
