//! CSV export.

use super::ExportRecord;
use crate::error::{ExportError, ExportResult};
use crate::scanner::ScanResult;
use std::fs::File;
use std::path::Path;

/// Write results as CSV with a `host,port,service,banner,scan_time` header.
///
/// Returns `false` without creating a file when there is nothing to write.
pub fn export_csv(path: &Path, results: &[ScanResult]) -> ExportResult<bool> {
    if results.is_empty() {
        return Ok(false);
    }

    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut wtr = csv::Writer::from_writer(file);

    for result in results {
        wtr.serialize(ExportRecord::from(result))?;
    }

    wtr.flush().map_err(write_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;

    #[test]
    fn test_csv_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let results = vec![
            ScanResult::open(
                "10.0.0.5",
                Port::new(21),
                "220 (vsFTPd 3.0.5)".into(),
                "2024-05-01 10:00:00".into(),
            ),
            ScanResult::open(
                "10.0.0.5",
                Port::new(7000),
                "a,b \"quoted\"".into(),
                "2024-05-01 10:00:03".into(),
            ),
        ];

        assert!(export_csv(&path, &results).unwrap());

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["host", "port", "service", "banner", "scan_time"]);

        let rows: Vec<Vec<String>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["10.0.0.5", "21", "FTP", "220 (vsFTPd 3.0.5)", "2024-05-01 10:00:00"],
                vec!["10.0.0.5", "7000", "", "a,b \"quoted\"", "2024-05-01 10:00:03"],
            ]
        );
    }

    #[test]
    fn test_csv_empty_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        assert!(!export_csv(&path, &[]).unwrap());
        assert!(!path.exists());
    }
}
