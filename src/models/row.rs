//! Data rows sourced from tabular input
//!
//! Rows are loaded once per run, ordered, and read-only afterwards.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of external tabular data (e.g., a CSV record)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    /// Zero-based position in the source; row order is significant
    pub index: usize,
    /// Column name → cell value
    pub values: BTreeMap<String, String>,
}

impl DataRow {
    /// Build a row from (column, value) pairs
    pub fn new<I, K, V>(index: usize, columns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = columns
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { index, values }
    }

    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Column names present in this row
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
