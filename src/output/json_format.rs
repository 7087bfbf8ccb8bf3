//! JSON export.

use super::ExportRecord;
use crate::error::{ExportError, ExportResult};
use crate::scanner::ScanResult;
use std::fs;
use std::path::Path;

/// Write results as a pretty-printed JSON array. Always writes, even `[]`.
pub fn export_json(path: &Path, results: &[ScanResult]) -> ExportResult<()> {
    let records: Vec<ExportRecord> = results.iter().map(ExportRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;

    fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
