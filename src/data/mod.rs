//! Tabular data sources
//!
//! Loads ordered data rows from CSV input. Parsing and I/O errors
//! surface here, before expansion runs; the expander only ever sees
//! already-parsed rows.

#![allow(dead_code)]

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::models::DataRow;

/// Load data rows from a CSV file. The header row supplies column names;
/// record order is preserved.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<DataRow>> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;

    let rows = read_rows(reader)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))?;

    info!("Loaded {} data rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read data rows from any CSV reader
pub fn read_csv(input: impl Read) -> Result<Vec<DataRow>> {
    read_rows(csv::Reader::from_reader(input))
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<DataRow>> {
    let headers = reader.headers().context("Failed to read CSV header")?.clone();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {index}"))?;
        let columns = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()));
        rows.push(DataRow::new(index, columns));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_preserves_row_order() {
        let input = "test_case,expected\nvalue 1,10\nvalue 2,20\nvalue 3,30\n";
        let rows = read_csv(input.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].get("test_case"), Some("value 1"));
        assert_eq!(rows[2].get("expected"), Some("30"));
    }

    #[test]
    fn test_read_csv_empty_body() {
        let rows = read_csv("a,b\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_load_csv_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "name,age\nAlice,30\nBob,25\n").unwrap();

        let rows = load_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some("Bob"));
    }

    #[test]
    fn test_load_csv_missing_file() {
        assert!(load_csv("/nonexistent/data.csv").is_err());
    }
}
