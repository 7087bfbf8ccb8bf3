//! # port-scanner
//!
//! Probes TCP ports across one or more hosts, labels open ports with their
//! well-known service and captures a one-line banner from each.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use port_scanner::scanner::{Dispatcher, ResultAggregator, ScanConfig, TcpProber};
//! use port_scanner::types::{parse_ports, TargetSet};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ports = parse_ports("20-25,80,443").unwrap();
//!     let targets = TargetSet::new(vec!["192.168.1.1".to_string()], ports);
//!
//!     let dispatcher = Dispatcher::new(TcpProber::new(), ScanConfig::default());
//!     let mut results = ResultAggregator::silent();
//!     dispatcher.scan(&targets, &mut results, &CancellationToken::new()).await;
//!
//!     for result in results.results() {
//!         println!("{}:{} {}", result.host(), result.port(), result.service());
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Port specifications, host lists and the target set
//! - [`scanner`] - Probe, work dispatcher and result aggregator
//! - [`services`] - Well-known port to service name table
//! - [`banner`] - Banner capture on open connections
//! - [`output`] - Console progress and JSON/CSV export
//! - [`config`] - Settings file handling
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ProbeError};
pub use scanner::{Dispatcher, ResultAggregator, ScanConfig, ScanOutcome, ScanResult, TcpProber};
pub use types::{Port, PortSpec, TargetSet};
