//! Error types for the port scanner.
//!
//! Uses `thiserror` for ergonomic error definitions. Probe-level errors
//! ([`ProbeError`], [`BannerError`]) never cross the probe boundary: they are
//! folded into a negative [`crate::scanner::ScanResult`]. Everything else is an
//! input, configuration or export problem surfaced before or after a scan.

use std::path::PathBuf;
use thiserror::Error;

pub use crate::types::{PortError, TargetError};

/// Why a single TCP connect attempt did not produce an open port.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection refused")]
    ConnectionRefused,

    #[error("connection timed out")]
    Timeout,

    #[error("host unreachable")]
    HostUnreachable,

    #[error("network unreachable")]
    NetworkUnreachable,

    #[error("failed to resolve '{0}'")]
    Resolution(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(#[source] std::io::Error),
}

impl From<std::io::Error> for ProbeError {
    fn from(e: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match e.kind() {
            ErrorKind::ConnectionRefused => Self::ConnectionRefused,
            ErrorKind::TimedOut => Self::Timeout,
            ErrorKind::HostUnreachable => Self::HostUnreachable,
            ErrorKind::NetworkUnreachable => Self::NetworkUnreachable,
            _ => Self::ConnectionFailed(e),
        }
    }
}

/// Why no banner was captured from an open port.
#[derive(Error, Debug)]
pub enum BannerError {
    #[error("no response within the timeout")]
    Timeout,

    #[error("peer sent no data")]
    NoData,

    #[error("banner exchange failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),

    #[error("invalid timeout: {0} (must be a positive number of seconds)")]
    InvalidTimeout(f64),

    #[error("invalid thread count: {0} (must be at least 1)")]
    InvalidConcurrency(usize),
}

/// Errors raised while writing result files.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
