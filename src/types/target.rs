//! Target types: host lists, host validation and the scan's target set.
//!
//! Hosts are kept exactly as the caller supplied them. Validation only checks
//! that each one is an IP literal or resolvable; the probe itself connects by
//! the original string.

use crate::types::Port;
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Error type for target parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("no targets specified")]
    Empty,
    #[error("invalid target(s): {}", .0.join(", "))]
    Invalid(Vec<String>),
}

/// Split a comma-separated target argument into hosts.
///
/// Order and duplicates are preserved; blank entries are dropped.
pub fn parse_hosts(spec: &str) -> Result<Vec<String>, TargetError> {
    let hosts: Vec<String> = spec
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect();

    if hosts.is_empty() {
        return Err(TargetError::Empty);
    }
    Ok(hosts)
}

/// Checks that hosts are IP literals or resolvable names.
pub struct HostValidator {
    resolver: TokioAsyncResolver,
}

impl HostValidator {
    /// Create a validator using the system resolver configuration, falling
    /// back to the resolver defaults when it cannot be read.
    pub fn new() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            debug!(error = %e, "system resolver config unavailable, using defaults");
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }

    /// Check a single host.
    pub async fn is_valid(&self, host: &str) -> bool {
        if host.parse::<IpAddr>().is_ok() {
            return true;
        }
        if !is_valid_hostname(host) {
            return false;
        }

        match self.resolver.lookup_ip(host).await {
            Ok(response) => response.iter().next().is_some(),
            Err(e) => {
                debug!(host, error = %e, "host did not resolve");
                false
            }
        }
    }

    /// Validate every host, reporting all rejected ones together.
    pub async fn validate(&self, hosts: &[String]) -> Result<(), TargetError> {
        let mut invalid = Vec::new();
        for host in hosts {
            if !self.is_valid(host).await {
                invalid.push(host.clone());
            }
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(TargetError::Invalid(invalid))
        }
    }
}

impl Default for HostValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// The full work set of a scan: hosts in caller order and ascending ports.
#[derive(Debug, Clone)]
pub struct TargetSet {
    hosts: Vec<String>,
    ports: Vec<Port>,
}

impl TargetSet {
    /// Create a target set. Ports are sorted and deduplicated.
    pub fn new(hosts: Vec<String>, mut ports: Vec<Port>) -> Self {
        ports.sort_unstable();
        ports.dedup();
        Self { hosts, ports }
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Total number of probes a full scan issues.
    pub fn probe_count(&self) -> usize {
        self.hosts.len() * self.ports.len()
    }
}

/// Check if a string is a syntactically valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters
    for label in s.trim_end_matches('.').split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        // Must start and end with alphanumeric
        if !label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return false;
        }
    }

    true
}
