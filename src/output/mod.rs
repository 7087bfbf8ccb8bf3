//! Output module.
//!
//! Console progress reporting plus the JSON and CSV exporters for the
//! retained open-port results.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::export_csv;
pub use json_format::export_json;
pub use plain::{print_error, print_scan_header, print_success, print_warning, ConsoleReporter};

use crate::error::ExportResult;
use crate::scanner::ScanResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One exported row. `is_open` is left out since only open ports are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub host: String,
    pub port: u16,
    pub service: String,
    pub banner: String,
    pub scan_time: String,
}

impl From<&ScanResult> for ExportRecord {
    fn from(result: &ScanResult) -> Self {
        Self {
            host: result.host().to_string(),
            port: result.port().as_u16(),
            service: result.service().to_string(),
            banner: result.banner().to_string(),
            scan_time: result.scan_time().to_string(),
        }
    }
}

/// Export results to `<base>.json` and `<base>.csv`.
///
/// Returns the paths actually written. The JSON file is always written; the
/// CSV file is skipped when there are no results.
pub fn export_all(base: &str, results: &[ScanResult]) -> ExportResult<Vec<PathBuf>> {
    let json_path = PathBuf::from(format!("{}.json", base));
    export_json(&json_path, results)?;
    let mut written = vec![json_path];

    let csv_path = PathBuf::from(format!("{}.csv", base));
    if export_csv(&csv_path, results)? {
        written.push(csv_path);
    }

    Ok(written)
}
